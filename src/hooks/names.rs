//! Hook names
//!
//! These strings are the contract with existing extensions and must not
//! change.

/// Filters the list of taxonomy ids whose terms are displayed
pub const TAXONOMIES: &str = "dcf_taxonomies";

/// Filters the whole raw metadata mapping of the post
pub const POSTMETA: &str = "dcf_postmeta";

/// Filters each metadata key; `Drop` suppresses the row
pub const POSTMETA_KEY: &str = "dcf_postmeta_key";

/// Filters the first value of each metadata key
pub const POSTMETA_VALUE: &str = "dcf_postmeta_value";

/// Veto for the whole block, checked before anything is collected
pub const DISPLAY_CUSTOM_FIELDS: &str = "display_custom_fields";

/// Resolves the sort strategy
pub const SORTER: &str = "dcf_sorter";

/// Final transform of the sorted dataset; empty suppresses the block
pub const DATA: &str = "dcf_data";

/// Filters the heading markup; empty removes the heading
pub const HEADING: &str = "dcf_heading";

/// Placement: true prepends the block, false appends it
pub const BEFORE_CONTENT: &str = "dcf_before_content";

/// Host hook the plugin attaches its content filter to
pub const THE_CONTENT: &str = "the_content";

/// Host action the plugin attaches its stylesheet registration to
pub const ENQUEUE_SCRIPTS: &str = "wp_enqueue_scripts";

/// Priority used when none is given
pub const DEFAULT_PRIORITY: i32 = 10;

/// Every extension hook, in the order the pipeline first touches them
pub const EXTENSION_HOOKS: [&str; 9] = [
    DISPLAY_CUSTOM_FIELDS,
    TAXONOMIES,
    POSTMETA,
    POSTMETA_KEY,
    POSTMETA_VALUE,
    SORTER,
    DATA,
    HEADING,
    BEFORE_CONTENT,
];
