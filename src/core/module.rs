//! Runtime message module: one live value per message key that follows the
//! current locale through its fallback chain.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, Weak};

use super::bundle::{Bundle, BundleError};
use super::format::{FormatArgs, FormatError, FormattedPattern, format_entry};
use super::locale::{DEFAULT_LOCALE, LocaleData, LocaleFallbackChain};
use super::reactive::{Signal, SubscriptionId};
use super::references::{ParamInfo, collect_params};
use super::syntax::Pattern;

#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Locale whose message ids define the module's keys.
    pub base_locale: String,
    pub locale_data: LocaleData,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            base_locale: DEFAULT_LOCALE.to_string(),
            locale_data: LocaleData::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// No locale in the chain has the key.
    MissingKey {
        key: String,
        locale: String,
        chain: LocaleFallbackChain,
    },
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::MissingKey { key, locale, chain } => write!(
                f,
                "no bundle has message '{key}' for locale '{locale}' (tried {chain})"
            ),
        }
    }
}

impl std::error::Error for ResolveError {}

/// A message picked from the first bundle in the chain that has it.
#[derive(Debug)]
pub struct ResolvedMessage {
    key: String,
    requested_locale: String,
    bundle: Arc<Bundle>,
}

impl ResolvedMessage {
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Locale the message was read from.
    pub fn locale(&self) -> &str {
        self.bundle.locale()
    }

    pub fn requested_locale(&self) -> &str {
        &self.requested_locale
    }

    pub fn is_fallback(&self) -> bool {
        self.locale() != self.requested_locale
    }

    pub fn value(&self) -> Option<&Pattern> {
        self.bundle.get_message(&self.key)?.value.as_ref()
    }

    pub fn format(&self, args: &FormatArgs) -> FormattedPattern {
        format_entry(self.bundle.as_ref(), &self.key, None, args).unwrap_or_else(|| {
            FormattedPattern {
                value: String::new(),
                errors: vec![FormatError::NoValue(self.key.clone())],
            }
        })
    }

    pub fn format_attribute(&self, name: &str, args: &FormatArgs) -> Option<FormattedPattern> {
        format_entry(self.bundle.as_ref(), &self.key, Some(name), args)
    }

    pub fn params(&self) -> Vec<ParamInfo> {
        collect_params(self.bundle.as_ref(), &self.key)
    }
}

/// Bundles by locale plus the metadata needed to walk fallback chains.
#[derive(Debug)]
struct Catalog {
    bundles: HashMap<String, Arc<Bundle>>,
    locale_data: LocaleData,
}

impl Catalog {
    fn resolve(&self, key: &str, locale: &str) -> Result<Arc<ResolvedMessage>, ResolveError> {
        let chain = self.locale_data.fallback_chain(locale);
        let bundle = chain
            .iter()
            .filter_map(|candidate| self.bundles.get(candidate))
            .find(|bundle| bundle.has_message(key));

        match bundle {
            Some(bundle) => Ok(Arc::new(ResolvedMessage {
                key: key.to_string(),
                requested_locale: locale.to_string(),
                bundle: Arc::clone(bundle),
            })),
            None => Err(ResolveError::MissingKey {
                key: key.to_string(),
                locale: locale.to_string(),
                chain,
            }),
        }
    }
}

type Slot = RwLock<Result<Arc<ResolvedMessage>, ResolveError>>;

struct MessageState {
    key: String,
    catalog: Arc<Catalog>,
    signal: Arc<dyn Signal<String>>,
    current: Slot,
}

impl MessageState {
    /// Resolve against the signal's current value. The value is read while
    /// the slot is locked, so the last writer always stores the latest locale.
    fn recompute(&self) {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *current = self.catalog.resolve(&self.key, &self.signal.get());
    }
}

/// The live value of one message key.
///
/// Reads return the memoized resolution; it is recomputed only when the
/// locale signal notifies a change.
pub struct LocalizedMessage {
    state: Arc<MessageState>,
    subscription: SubscriptionId,
}

impl LocalizedMessage {
    fn new(key: String, catalog: Arc<Catalog>, signal: Arc<dyn Signal<String>>) -> Self {
        let initial = catalog.resolve(&key, &signal.get());
        let state = Arc::new(MessageState {
            key,
            catalog,
            signal,
            current: RwLock::new(initial),
        });

        let weak: Weak<MessageState> = Arc::downgrade(&state);
        let subscription = state.signal.subscribe(Arc::new(move |_: &String| {
            if let Some(state) = weak.upgrade() {
                state.recompute();
            }
        }));
        // A change between the first read and the subscription is not
        // notified.
        state.recompute();

        Self {
            state,
            subscription,
        }
    }

    pub fn key(&self) -> &str {
        &self.state.key
    }

    /// The message for the current locale, or the error explaining why no
    /// bundle in the chain has it.
    pub fn get(&self) -> Result<Arc<ResolvedMessage>, ResolveError> {
        self.state
            .current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn format(&self, args: &FormatArgs) -> Result<FormattedPattern, ResolveError> {
        Ok(self.get()?.format(args))
    }
}

impl Drop for LocalizedMessage {
    fn drop(&mut self) {
        self.state.signal.unsubscribe(self.subscription);
    }
}

impl fmt::Debug for LocalizedMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalizedMessage")
            .field("key", &self.state.key)
            .finish_non_exhaustive()
    }
}

/// Every message of the base locale, keyed by id.
pub struct MessageModule {
    keys: Vec<String>,
    messages: BTreeMap<String, LocalizedMessage>,
    catalog: Arc<Catalog>,
}

impl MessageModule {
    pub fn get(&self, key: &str) -> Option<&LocalizedMessage> {
        self.messages.get(key)
    }

    /// Keys in base-locale source order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Locales with a bundle, sorted.
    pub fn locales(&self) -> Vec<&str> {
        let mut locales: Vec<&str> = self.catalog.bundles.keys().map(String::as_str).collect();
        locales.sort_unstable();
        locales
    }

    pub fn bundle(&self, locale: &str) -> Option<&Arc<Bundle>> {
        self.catalog.bundles.get(locale)
    }

    /// Resolve every key for every locale in `locales`, collecting every
    /// failure.
    pub fn validate<'l>(
        &self,
        locales: impl IntoIterator<Item = &'l str>,
    ) -> Result<(), Vec<ResolveError>> {
        let mut errors = Vec::new();
        for locale in locales {
            for key in &self.keys {
                if let Err(err) = self.catalog.resolve(key, locale) {
                    errors.push(err);
                }
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl fmt::Debug for MessageModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageModule")
            .field("keys", &self.keys)
            .field("locales", &self.locales())
            .finish_non_exhaustive()
    }
}

/// Parse every locale strictly and build one [`LocalizedMessage`] per
/// base-locale message, all following `signal`.
pub fn build_module<I, K, V, S>(
    sources_by_locale: I,
    options: BuildOptions,
    signal: Arc<S>,
) -> Result<MessageModule, BundleError>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: AsRef<str>,
    S: Signal<String> + 'static,
{
    let mut bundles = HashMap::new();
    for (locale, source) in sources_by_locale {
        let bundle = Bundle::from_source(locale, source.as_ref())?;
        bundles.insert(bundle.locale().to_string(), Arc::new(bundle));
    }

    let base = bundles
        .get(&options.base_locale)
        .ok_or_else(|| BundleError::MissingBaseLocale {
            locale: options.base_locale.clone(),
        })?;
    let keys: Vec<String> = base.message_ids().into_iter().map(str::to_string).collect();

    let catalog = Arc::new(Catalog {
        bundles,
        locale_data: options.locale_data,
    });
    let signal: Arc<dyn Signal<String>> = signal;

    let messages = keys
        .iter()
        .map(|key| {
            let message =
                LocalizedMessage::new(key.clone(), Arc::clone(&catalog), Arc::clone(&signal));
            (key.clone(), message)
        })
        .collect();

    Ok(MessageModule {
        keys,
        messages,
        catalog,
    })
}
