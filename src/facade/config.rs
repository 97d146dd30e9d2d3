/// Where a database lives and how loudly it logs.
///
/// ```
/// use jsontabledb::DatabaseConfig;
///
/// let config = DatabaseConfig::new("heroes").container("games").debug(true);
/// assert_eq!(config.database, "heroes.json");
/// assert_eq!(config.container, "games");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Document name, always ending in `.json`
    pub database: String,

    /// Container (folder) the document is stored in
    pub container: String,

    /// Log save/load/set outcomes at info level
    pub debug: bool,
}

pub const DEFAULT_DATABASE: &str = "db";
pub const DEFAULT_CONTAINER: &str = "root";

impl DatabaseConfig {
    /// Configuration for the document `database`.
    ///
    /// The name is trimmed and gets a `.json` extension unless it already
    /// ends in one (any case). A blank name falls back to `db.json`.
    pub fn new(database: &str) -> Self {
        Self {
            database: normalize_name(database),
            container: DEFAULT_CONTAINER.to_string(),
            debug: false,
        }
    }

    /// Set the container. Blank values keep the current one.
    pub fn container(mut self, container: &str) -> Self {
        let container = container.trim();
        if !container.is_empty() {
            self.container = container.to_string();
        }
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATABASE)
    }
}

fn normalize_name(database: &str) -> String {
    let name = match database.trim() {
        "" => DEFAULT_DATABASE,
        name => name,
    };
    let has_extension = name
        .rsplit_once('.')
        .is_some_and(|(stem, ext)| !stem.is_empty() && ext.eq_ignore_ascii_case("json"));
    if has_extension {
        name.to_string()
    } else {
        format!("{}.json", name)
    }
}
