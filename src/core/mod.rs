//! Core engine: FTL syntax, static analysis and the runtime resolver.
//!
//! ## Module Structure
//!
//! - `syntax`: AST, parser and serializer
//! - `index`: id → entry lookup (`EntryIndex`, `EntryLookup`)
//! - `references`: parameter and reference collection over the reference graph
//! - `hoist`, `flatten`: authoring JSON → FTL
//! - `locale`: locale metadata and fallback chains
//! - `bundle`, `reactive`, `module`: runtime message resolution
//! - `format`: pattern rendering
//! - `verify`, `location`, `sources`: file checks and discovery

pub mod bundle;
pub mod flatten;
pub mod format;
pub mod hoist;
pub mod index;
pub mod locale;
pub mod location;
pub mod module;
pub mod reactive;
pub mod references;
pub mod sources;
pub mod syntax;
pub mod verify;

pub use bundle::{Bundle, BundleError, SyntaxError};
pub use flatten::{FlatMessage, FlattenError, flatten_messages, render_ftl};
pub use format::{
    ArgValue, FormatArgs, FormatError, FormattedPattern, Sample, format_entry, format_pattern,
    sample_renderings,
};
pub use hoist::hoist_selects;
pub use index::{EntryIndex, EntryLookup};
pub use locale::{Direction, LocaleData, LocaleDataError, LocaleFallbackChain, LocaleInfo};
pub use location::{MessageContext, SourceContext, SourceLocation};
pub use module::{
    BuildOptions, LocalizedMessage, MessageModule, ResolveError, ResolvedMessage, build_module,
};
pub use reactive::{LocaleCell, Signal, SubscriptionId};
pub use references::{
    NumericCategory, ParamInfo, VariantValue, collect_internal_references, collect_params,
    direct_references, selector_values,
};
pub use sources::{ScanResult, SourceFile, scan_sources};
pub use verify::{LocaleSource, find_orphan_keys, verify_resource};
