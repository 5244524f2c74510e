use std::sync::Once;
use tracing::warn;

/// Locale used when the configured one has no translations
pub const FALLBACK_LOCALE: &str = "ko";

static LOCALE_INIT: Once = Once::new();

/// Switch to the Korean locale unless a locale was already chosen.
/// Called before rendering localized text, so library users who never
/// call `set_locale` still see Korean strings.
pub fn ensure_locale() {
    LOCALE_INIT.call_once(|| rust_i18n::set_locale(FALLBACK_LOCALE));
}

/// Switch the process-wide locale, falling back when the locale is unknown
pub fn set_locale(locale: &str) {
    LOCALE_INIT.call_once(|| {});

    let available = rust_i18n::available_locales!();
    if available.iter().any(|l| *l == locale) {
        rust_i18n::set_locale(locale);
    } else {
        warn!("Unknown locale '{}', using '{}'", locale, FALLBACK_LOCALE);
        rust_i18n::set_locale(FALLBACK_LOCALE);
    }
}
