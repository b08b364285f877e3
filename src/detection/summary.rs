use crate::models::DetectionEvent;

/// Format a Rupiah amount the way id-ID locales do: `Rp 20.000`
pub fn format_rupiah(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    format!("Rp {}", grouped)
}

/// One-line description of an accepted detection
pub fn summarize(event: &DetectionEvent) -> String {
    format!(
        "Nominal: {}, Keyakinan: {:.1}%",
        format_rupiah(event.denomination.value()),
        f64::from(event.confidence) * 100.0
    )
}
