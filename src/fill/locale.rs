use tracing::{debug, warn};

/// Locale code used when a requested code is not supported.
pub const DEFAULT_LOCALE: &str = "en_US";

/// Which `fake` dataset backs a locale.
///
/// Codes without a dedicated dataset are served by `En`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocaleBackend {
    En,
    FrFr,
    PtBr,
    ZhCn,
    ZhTw,
    JaJp,
    ArSa,
}

/// Generation source for one locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleProvider {
    pub code: &'static str,
    pub display_name: &'static str,
    pub backend: LocaleBackend,
}

const fn locale(code: &'static str, display_name: &'static str, backend: LocaleBackend) -> LocaleProvider {
    LocaleProvider {
        code,
        display_name,
        backend,
    }
}

/// Every supported locale code.
pub static SUPPORTED_LOCALES: &[LocaleProvider] = &[
    locale("en_US", "English (US)", LocaleBackend::En),
    locale("en_GB", "English (UK)", LocaleBackend::En),
    locale("en_CA", "English (Canada)", LocaleBackend::En),
    locale("en_AU", "English (Australia)", LocaleBackend::En),
    locale("es", "Spanish", LocaleBackend::En),
    locale("es_MX", "Spanish (Mexico)", LocaleBackend::En),
    locale("fr", "French", LocaleBackend::FrFr),
    locale("fr_CA", "French (Canada)", LocaleBackend::FrFr),
    locale("de", "German", LocaleBackend::En),
    locale("de_AT", "German (Austria)", LocaleBackend::En),
    locale("de_CH", "German (Switzerland)", LocaleBackend::En),
    locale("it", "Italian", LocaleBackend::En),
    locale("pt_BR", "Portuguese (Brazil)", LocaleBackend::PtBr),
    locale("pt_PT", "Portuguese (Portugal)", LocaleBackend::PtBr),
    locale("nl", "Dutch", LocaleBackend::En),
    locale("pl", "Polish", LocaleBackend::En),
    locale("ru", "Russian", LocaleBackend::En),
    locale("tr", "Turkish", LocaleBackend::En),
    locale("ja", "Japanese", LocaleBackend::JaJp),
    locale("ko", "Korean", LocaleBackend::En),
    locale("zh_CN", "Chinese (Simplified)", LocaleBackend::ZhCn),
    locale("zh_TW", "Chinese (Traditional)", LocaleBackend::ZhTw),
    locale("ar", "Arabic", LocaleBackend::ArSa),
    locale("hi", "Hindi", LocaleBackend::En),
    locale("sv", "Swedish", LocaleBackend::En),
    locale("nb_NO", "Norwegian", LocaleBackend::En),
    locale("da", "Danish", LocaleBackend::En),
    locale("fi", "Finnish", LocaleBackend::En),
    locale("cs", "Czech", LocaleBackend::En),
    locale("el", "Greek", LocaleBackend::En),
    locale("he", "Hebrew", LocaleBackend::En),
    locale("id_ID", "Indonesian", LocaleBackend::En),
    locale("th", "Thai", LocaleBackend::En),
    locale("vi", "Vietnamese", LocaleBackend::En),
    locale("ro", "Romanian", LocaleBackend::En),
    locale("uk", "Ukrainian", LocaleBackend::En),
];

pub fn supported_locales() -> &'static [LocaleProvider] {
    SUPPORTED_LOCALES
}

pub fn is_supported(code: &str) -> bool {
    lookup(code).is_some()
}

pub fn default_provider() -> LocaleProvider {
    SUPPORTED_LOCALES[0]
}

/// Resolve a locale code to its provider, falling back to `en_US`.
pub fn resolve(code: &str) -> LocaleProvider {
    match lookup(code) {
        Some(provider) => {
            debug!(locale = provider.code, "using locale");
            provider
        }
        None => {
            warn!(requested = code, fallback = DEFAULT_LOCALE, "locale not supported, falling back");
            default_provider()
        }
    }
}

fn lookup(code: &str) -> Option<LocaleProvider> {
    SUPPORTED_LOCALES.iter().find(|p| p.code == code).copied()
}
