pub mod compile_time {
    pub mod cache {
        /// Default number of entries held per direction by the qualified-name cache
        /// RESOURCE: Bounds memory used by lazily interned names
        pub const DEFAULT_QNAME_CACHE_CAPACITY: usize = 10_000;

        /// Upper bound accepted from configuration
        pub const MAX_QNAME_CACHE_CAPACITY: usize = 10_000_000;
    }

    pub mod query {
        /// Lower range sentinel for numeric and date fields
        pub const NUMERIC_MIN: &str = "MIN";

        /// Upper range sentinel for numeric and date fields
        pub const NUMERIC_MAX: &str = "MAX";

        /// Lower range sentinel for text fields
        pub const STRING_MIN: &str = "\u{0}";

        /// Upper range sentinel for text fields
        pub const STRING_MAX: &str = "\u{FFFF}";

        /// Suffix of the locale-invariant sort variant of a text field
        pub const NO_LOCALE_SUFFIX: &str = "no_locale";

        /// Field holding a node's primary reference
        pub const FIELD_ID: &str = "ID";

        /// Field holding a node's type and all its super types
        pub const FIELD_TYPE: &str = "TYPE";

        /// Field holding exactly a node's own type
        pub const FIELD_EXACT_TYPE: &str = "EXACTTYPE";

        /// Field holding a node's aspects
        pub const FIELD_ASPECT: &str = "ASPECT";

        /// Field holding a node's primary parent
        pub const FIELD_PARENT: &str = "PARENT";

        /// Prefix of a property field
        pub const PROPERTY_FIELD_PREFIX: &str = "@";
    }

    pub mod versioning {
        /// Label of a private working copy
        pub const PWC_LABEL: &str = "pwc";

        /// Label every never-versioned document implicitly carries
        pub const INITIAL_LABEL: &str = "1.0";

        /// Separator between a version series id and a version label
        pub const LABEL_SEPARATOR: char = ';';

        /// Prefix of a relationship object id
        pub const ASSOCIATION_ID_PREFIX: &str = "assoc:";
    }
}

pub use compile_time::*;
