// SPDX-License-Identifier: MPL-2.0
use crate::config::{Config, DEFAULT_LOCALE};
use fluent_bundle::{FluentArgs, FluentBundle, FluentResource, FluentValue};
use rust_embed::RustEmbed;
use std::collections::HashMap;
use std::fmt;
use unic_langid::LanguageIdentifier;

#[derive(RustEmbed)]
#[folder = "assets/i18n/"]
struct Asset;

/// Message id of the "N unread alerts" notice.
const PENDING_NOTICE_KEY: &str = "pending-alerts-notice";

pub struct I18n {
    bundles: HashMap<LanguageIdentifier, FluentBundle<FluentResource>>,
    pub available_locales: Vec<LanguageIdentifier>,
    current_locale: LanguageIdentifier,
}

impl Default for I18n {
    fn default() -> Self {
        Self::new(None, &Config::default())
    }
}

impl fmt::Debug for I18n {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("I18n")
            .field("available_locales", &self.available_locales)
            .field("current_locale", &self.current_locale)
            .finish()
    }
}

impl I18n {
    /// Loads the embedded translations and resolves the locale from the
    /// command line, then the settings, then the OS.
    pub fn new(cli_lang: Option<String>, config: &Config) -> Self {
        let (bundles, available_locales) = load_bundles();
        let current_locale = resolve_locale(cli_lang, config, &available_locales)
            .unwrap_or_else(default_locale);

        Self {
            bundles,
            available_locales,
            current_locale,
        }
    }

    /// Loads the embedded translations and selects `en-US` without looking
    /// at the environment.
    #[must_use]
    pub fn fallback() -> Self {
        let (bundles, available_locales) = load_bundles();
        Self {
            bundles,
            available_locales,
            current_locale: default_locale(),
        }
    }

    pub fn set_locale(&mut self, locale: LanguageIdentifier) {
        if self.bundles.contains_key(&locale) {
            self.current_locale = locale;
        }
    }

    #[must_use]
    pub fn current_locale(&self) -> &LanguageIdentifier {
        &self.current_locale
    }

    pub fn tr(&self, key: &str) -> String {
        self.format(key, None)
    }

    pub fn tr_with_args(&self, key: &str, args: &[(&str, FluentValue<'_>)]) -> String {
        let mut fluent_args = FluentArgs::new();
        for (name, value) in args {
            fluent_args.set(*name, value.clone());
        }
        self.format(key, Some(&fluent_args))
    }

    /// Returns the localized "N unread alerts" text.
    pub fn pending_notice(&self, count: usize) -> String {
        self.tr_with_args(PENDING_NOTICE_KEY, &[("count", FluentValue::from(count))])
    }

    fn format(&self, key: &str, args: Option<&FluentArgs<'_>>) -> String {
        if let Some(bundle) = self.bundles.get(&self.current_locale) {
            if let Some(msg) = bundle.get_message(key) {
                if let Some(pattern) = msg.value() {
                    let mut errors = vec![];
                    let value = bundle.format_pattern(pattern, args, &mut errors);
                    if errors.is_empty() {
                        return value.to_string();
                    }
                }
            }
        }
        format!("MISSING: {}", key)
    }
}

fn default_locale() -> LanguageIdentifier {
    DEFAULT_LOCALE.parse().unwrap_or_default()
}

fn load_bundles() -> (
    HashMap<LanguageIdentifier, FluentBundle<FluentResource>>,
    Vec<LanguageIdentifier>,
) {
    let mut bundles = HashMap::new();
    let mut available_locales = Vec::new();

    for file in Asset::iter() {
        let filename = file.as_ref();
        let Some(locale_str) = filename.strip_suffix(".ftl") else {
            continue;
        };
        let Ok(locale) = locale_str.parse::<LanguageIdentifier>() else {
            continue;
        };
        let Some(content) = Asset::get(filename) else {
            continue;
        };

        let source = String::from_utf8_lossy(content.data.as_ref()).to_string();
        // A resource with syntax errors still carries every entry that parsed.
        let resource = FluentResource::try_new(source).unwrap_or_else(|(partial, _)| partial);
        let mut bundle = FluentBundle::new(vec![locale.clone()]);
        // Notices end up in terminals and dialogs, not bidi-aware layouts.
        bundle.set_use_isolating(false);
        bundle.add_resource_overriding(resource);
        bundles.insert(locale.clone(), bundle);
        available_locales.push(locale);
    }

    available_locales.sort_by_key(ToString::to_string);
    (bundles, available_locales)
}

fn resolve_locale(
    cli_lang: Option<String>,
    config: &Config,
    available: &[LanguageIdentifier],
) -> Option<LanguageIdentifier> {
    // 1. Check CLI args
    if let Some(lang) = cli_lang.as_deref().and_then(|s| pick(s, available)) {
        return Some(lang);
    }

    // 2. Check config file
    if let Some(lang) = config.language.as_deref().and_then(|s| pick(s, available)) {
        return Some(lang);
    }

    // 3. Check OS locale
    sys_locale::get_locale().and_then(|s| pick(&s, available))
}

fn pick(lang_str: &str, available: &[LanguageIdentifier]) -> Option<LanguageIdentifier> {
    let lang = lang_str.parse::<LanguageIdentifier>().ok()?;
    available.contains(&lang).then_some(lang)
}
