// ABOUTME: Centralized constants for the search engine
// ABOUTME: Contains field names, key substitutions, operator tokens, and entity type names

use phf::phf_map;

/// Canonical field names on a searchable item
pub mod fields {
    pub const LABEL: &str = "label";
    pub const TAGS: &str = "tags";
    pub const IPS: &str = "ips";
    pub const VALUE: &str = "value";
    pub const ENTITY_TYPE: &str = "entityType";

    /// Fields searched by a clause with no key
    pub const DEFAULT_SEARCH_FIELDS: &[&str] = &[LABEL, TAGS, IPS];

    /// Fields that live on the item itself rather than in its data bag
    pub const TOP_LEVEL_FIELDS: &[&str] = &[LABEL, VALUE, ENTITY_TYPE];
}

/// User-facing key aliases and the field each one resolves to
pub static FIELD_SUBSTITUTIONS: phf::Map<&'static str, &'static str> = phf_map! {
    "name" => "label",
    "title" => "label",
    "tag" => "tags",
    "group" => "tags",
    "ip" => "ips",
};

/// Boolean operator tokens understood by the parser
pub mod operators {
    pub const AND: &str = "AND";
    pub const OR: &str = "OR";

    /// Shorthand operators rewritten by the formatter
    pub const AND_SHORTHAND: &str = " && ";
    pub const OR_SHORTHAND: &str = " || ";

    /// Deepest parenthesized group the parser will descend into
    pub const MAX_NESTING_DEPTH: usize = 64;
}

/// Entity type tags as they appear in item payloads
pub mod entity_type {
    pub const LINODE: &str = "linode";
    pub const VOLUME: &str = "volume";
    pub const DOMAIN: &str = "domain";
    pub const IMAGE: &str = "image";
    pub const NODEBALANCER: &str = "nodebalancer";
    pub const KUBERNETES_CLUSTER: &str = "kubernetesCluster";
    pub const BUCKET: &str = "bucket";
    pub const FIREWALL: &str = "firewall";
    pub const DATABASE: &str = "database";

    pub const ALL_ENTITY_TYPES: &[&str] = &[
        LINODE,
        VOLUME,
        DOMAIN,
        IMAGE,
        NODEBALANCER,
        KUBERNETES_CLUSTER,
        BUCKET,
        FIREWALL,
        DATABASE,
    ];
}
