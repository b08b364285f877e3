pub mod csv;
pub mod glyphs;
pub mod image;

pub use self::csv::{CSV_HEADER, save_csv, to_csv_string, write_csv};
pub use self::image::{render_ledger, save_png};

pub const DEFAULT_CSV_NAME: &str = "hasil_hitung_uang.csv";
pub const DEFAULT_PNG_NAME: &str = "hasil_hitung_uang.png";
