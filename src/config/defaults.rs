/// Title used when neither an override nor the citation file provides one
pub const DEFAULT_TITLE: &str = "TEP-EXP";

/// Base Producer label; the release suffix is appended when known
pub const PRODUCER_BASE: &str = "TEP-EXP Research Project";

/// License assumed when the citation file does not name one
pub const DEFAULT_LICENSE: &str = "CC-BY-4.0";

/// Copyright notice written for any CC-BY license variant
pub const CC_BY_NOTICE: &str =
    "Creative Commons Attribution 4.0 International License (CC BY 4.0)";

/// Citation file name looked up in the project root
pub const CITATION_FILE: &str = "CITATION.cff";

/// Version descriptor file name looked up in the project root
pub const VERSION_FILE: &str = "VERSION.json";
