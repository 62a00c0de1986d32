// SPDX-License-Identifier: MPL-2.0
use crate::config::Options;
use fluent_bundle::{FluentBundle, FluentResource};
use rust_embed::RustEmbed;
use std::collections::HashMap;
use unic_langid::LanguageIdentifier;

#[derive(RustEmbed)]
#[folder = "assets/i18n/"]
struct Asset;

const DEFAULT_LOCALE: &str = "en-US";

/// Message keys rendered by the overlay.
pub mod keys {
    pub const IMAGE_LOAD_FAILED: &str = "image-load-failed";
    pub const BUTTON_CLOSE: &str = "button-close";
    pub const BUTTON_PREVIOUS: &str = "button-previous";
    pub const BUTTON_NEXT: &str = "button-next";
}

pub struct I18n {
    bundles: HashMap<LanguageIdentifier, FluentBundle<FluentResource>>,
    current_locale: LanguageIdentifier,
}

impl std::fmt::Debug for I18n {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("I18n")
            .field("locales", &self.bundles.keys().collect::<Vec<_>>())
            .field("current_locale", &self.current_locale)
            .finish()
    }
}

impl Default for I18n {
    fn default() -> Self {
        Self::new(None, &Options::default())
    }
}

impl I18n {
    pub fn new(lang: Option<String>, options: &Options) -> Self {
        let mut bundles = HashMap::new();
        let mut available_locales = Vec::new();

        for file in Asset::iter() {
            let filename = file.as_ref();
            let Some(locale) = filename
                .strip_suffix(".ftl")
                .and_then(|s| s.parse::<LanguageIdentifier>().ok())
            else {
                continue;
            };
            let Some(content) = Asset::get(filename) else {
                continue;
            };
            let source = String::from_utf8_lossy(content.data.as_ref()).to_string();
            let resource = match FluentResource::try_new(source) {
                Ok(res) => res,
                Err((_, errors)) => {
                    tracing::warn!(file = filename, errors = errors.len(), "Skipping malformed translation file");
                    continue;
                }
            };
            let mut bundle = FluentBundle::new(vec![locale.clone()]);
            // Bidi isolation marks would leak into attribute values.
            bundle.set_use_isolating(false);
            if let Err(errors) = bundle.add_resource(resource) {
                tracing::warn!(file = filename, errors = errors.len(), "Skipping conflicting translation file");
                continue;
            }
            bundles.insert(locale.clone(), bundle);
            available_locales.push(locale);
        }

        let current_locale = resolve_locale(lang, options, &available_locales)
            .unwrap_or_else(default_locale);

        Self {
            bundles,
            current_locale,
        }
    }

    #[must_use]
    pub fn current_locale(&self) -> &LanguageIdentifier {
        &self.current_locale
    }

    #[must_use]
    pub fn tr(&self, key: &str) -> String {
        if let Some(bundle) = self.bundles.get(&self.current_locale) {
            if let Some(pattern) = bundle.get_message(key).and_then(|msg| msg.value()) {
                let mut errors = vec![];
                let value = bundle.format_pattern(pattern, None, &mut errors);
                if errors.is_empty() {
                    return value.to_string();
                }
            }
        }
        format!("MISSING: {key}")
    }
}

fn default_locale() -> LanguageIdentifier {
    DEFAULT_LOCALE.parse().unwrap_or_default()
}

fn resolve_locale(
    lang: Option<String>,
    options: &Options,
    available: &[LanguageIdentifier],
) -> Option<LanguageIdentifier> {
    let pick = |candidate: &str| {
        candidate
            .parse::<LanguageIdentifier>()
            .ok()
            .filter(|lang| available.contains(lang))
    };

    lang.as_deref()
        .and_then(pick)
        .or_else(|| options.language.as_deref().and_then(pick))
        .or_else(|| sys_locale::get_locale().as_deref().and_then(pick))
        .or_else(|| pick(DEFAULT_LOCALE))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn available() -> Vec<LanguageIdentifier> {
        vec!["en-US".parse().unwrap(), "fr".parse().unwrap()]
    }

    #[test]
    fn explicit_language_wins() {
        let options = Options {
            language: Some("en-US".to_string()),
            ..Options::default()
        };
        let lang = resolve_locale(Some("fr".to_string()), &options, &available());
        assert_eq!(lang, Some("fr".parse().unwrap()));
    }

    #[test]
    fn options_language_used_without_explicit() {
        let options = Options {
            language: Some("fr".to_string()),
            ..Options::default()
        };
        let lang = resolve_locale(None, &options, &available());
        assert_eq!(lang, Some("fr".parse().unwrap()));
    }

    #[test]
    fn unknown_language_falls_back_to_available() {
        let lang = resolve_locale(Some("xx".to_string()), &Options::default(), &available());
        // OS locale is environment dependent; whatever is picked must exist.
        let lang = lang.expect("en-US fallback is available");
        assert!(available().contains(&lang));
    }

    #[test]
    fn default_locale_is_en_us() {
        assert_eq!(default_locale().to_string(), "en-US");
    }

    #[test]
    fn translates_failure_text() {
        let en = I18n::new(Some("en-US".to_string()), &Options::default());
        assert_eq!(en.tr(keys::IMAGE_LOAD_FAILED), "Failed to load image");

        let fr = I18n::new(Some("fr".to_string()), &Options::default());
        assert_eq!(fr.tr(keys::BUTTON_CLOSE), "Fermer");
    }

    #[test]
    fn unknown_requested_locale_resolves_to_a_loaded_bundle() {
        let i18n = I18n::new(Some("xx".to_string()), &Options::default());
        assert!(i18n.bundles.contains_key(i18n.current_locale()));
        assert!(!i18n.tr(keys::BUTTON_NEXT).starts_with("MISSING"));
    }

    #[test]
    fn missing_key_is_marked() {
        let i18n = I18n::new(Some("en-US".to_string()), &Options::default());
        assert_eq!(i18n.tr("no-such-key"), "MISSING: no-such-key");
    }
}
