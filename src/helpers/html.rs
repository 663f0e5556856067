//! HTML helper functions

/// Title class for a mini post accent; unknown accents get the cyan default
pub fn accent_class(accent: &str) -> &'static str {
    match accent {
        "pink" => "text-pink-300",
        "emerald" => "text-emerald-300",
        "sky" => "text-sky-300",
        "indigo" => "text-indigo-300",
        _ => "text-cyan-300",
    }
}

/// Inject a snippet right before `</body>`, or append it when there is none
pub fn inject_before_body_end(html: &str, snippet: &str) -> String {
    match html.rfind("</body>") {
        Some(pos) => format!("{}{}{}", &html[..pos], snippet, &html[pos..]),
        None => format!("{}{}", html, snippet),
    }
}
