use indexmap::IndexMap;

/// Package-id fragments of common Android TV apps and their display names.
pub const KNOWN_APPS: &[(&str, &str)] = &[
    ("amazon", "Amazon Prime Video"),
    ("dream", "Screensaver"),
    ("kodi", "Kodi"),
    ("netflix", "Netflix"),
    ("plex", "Plex"),
    ("spotify", "Spotify"),
    ("tvlauncher", "Homescreen"),
    ("youtube", "Youtube"),
    ("zatto", "Zattoo"),
];

/// Maps package ids to display names by substring.
#[derive(Debug, Clone, PartialEq)]
pub struct AppTable {
    apps: IndexMap<String, String>,
}

impl Default for AppTable {
    fn default() -> Self {
        Self {
            apps: KNOWN_APPS
                .iter()
                .map(|(id, name)| (id.to_string(), name.to_string()))
                .collect(),
        }
    }
}

impl AppTable {
    /// Built-in table with `custom` entries added; a custom entry for an
    /// existing key renames it in place.
    pub fn with_custom<I, K, V>(custom: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut table = Self::default();
        table
            .apps
            .extend(custom.into_iter().map(|(k, v)| (k.into(), v.into())));
        table
    }

    /// The last entry whose key occurs in `app_id`.
    pub fn app_name(&self, app_id: &str) -> Option<&str> {
        self.apps
            .iter()
            .filter(|(fragment, _)| app_id.contains(fragment.as_str()))
            .map(|(_, name)| name.as_str())
            .last()
    }

    pub fn len(&self) -> usize {
        self.apps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_names() {
        let apps = AppTable::default();
        assert_eq!(apps.app_name("com.netflix.ninja"), Some("Netflix"));
        assert_eq!(
            apps.app_name("com.google.android.tvlauncher"),
            Some("Homescreen")
        );
        assert_eq!(apps.app_name("org.xbmc.kodi"), Some("Kodi"));
        assert_eq!(apps.app_name("com.example.unknown"), None);
        assert_eq!(apps.app_name(""), None);
    }

    #[test]
    fn custom_entries_extend_and_override() {
        let apps = AppTable::with_custom([("com.example.tv", "Example"), ("kodi", "Kodi 19")]);
        assert_eq!(apps.len(), KNOWN_APPS.len() + 1);
        assert_eq!(apps.app_name("com.example.tv"), Some("Example"));
        assert_eq!(apps.app_name("org.xbmc.kodi"), Some("Kodi 19"));
    }

    #[test]
    fn last_matching_entry_wins() {
        // "amazon" and the custom fragment both match
        let apps = AppTable::with_custom([("amazon.avod", "Prime Video (TV)")]);
        assert_eq!(
            apps.app_name("com.amazon.amazonvideo.livingroom"),
            Some("Amazon Prime Video")
        );
        assert_eq!(
            apps.app_name("com.amazon.avod.thirdpartyclient"),
            Some("Prime Video (TV)")
        );
    }
}
