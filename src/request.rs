use urlencoding::encode;

pub const DEFAULT_REGION: &str = "us";
pub const DEFAULT_SEARCH_TYPE: &str = "1t";

/// The endpoints this client knows how to address. Arguments are kept raw
/// and each one is percent-encoded on its own when the path is rendered, so
/// separators such as `$` and `!` are never confused with user input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Request {
    CharacterByNameCode {
        region: String,
        name: String,
        code: String,
    },
    CharacterByBnetId {
        region: String,
        name: String,
        bnet_id: String,
    },
    ProfileSearch {
        region: String,
        name: String,
        search_type: String,
        subtype: String,
        value: String,
    },
    MapUsage {
        map_id: String,
    },
}

impl Request {
    pub fn path(&self) -> String {
        match self {
            Request::CharacterByNameCode { region, name, code } => format!(
                "teams/{}/{}${}.json",
                encode(region),
                encode(name),
                encode(code)
            ),
            Request::CharacterByBnetId {
                region,
                name,
                bnet_id,
            } => format!(
                "teams/{}/{}!{}.json",
                encode(region),
                encode(name),
                encode(bnet_id)
            ),
            Request::ProfileSearch {
                region,
                name,
                search_type,
                subtype,
                value,
            } => format!(
                "psearch/{}/{}/{}/{}/{}.json",
                encode(region),
                encode(name),
                encode(search_type),
                encode(subtype),
                encode(value)
            ),
            Request::MapUsage { map_id } => format!("map/{}.json", encode(map_id)),
        }
    }

    /// `encoded_key` must already be percent-encoded.
    pub fn url(&self, base_url: &str, encoded_key: &str) -> String {
        format!(
            "{}/{}?appKey={}",
            base_url.trim_end_matches('/'),
            self.path(),
            encoded_key
        )
    }
}

pub fn encode_site_key(site_key: &str) -> String {
    encode(site_key).into_owned()
}

#[cfg(test)]
mod test {
    use super::*;

    fn character(name: &str, code: &str) -> Request {
        Request::CharacterByNameCode {
            region: DEFAULT_REGION.into(),
            name: name.into(),
            code: code.into(),
        }
    }

    #[test]
    fn test_character_paths() {
        assert_eq!(character("meerkat", "678").path(), "teams/us/meerkat$678.json");
        assert_eq!(
            Request::CharacterByBnetId {
                region: "eu".into(),
                name: "HuK".into(),
                bnet_id: "530".into(),
            }
            .path(),
            "teams/eu/HuK!530.json"
        );
    }

    #[test]
    fn test_profile_search_path() {
        let request = Request::ProfileSearch {
            region: DEFAULT_REGION.into(),
            name: "meerkat".into(),
            search_type: DEFAULT_SEARCH_TYPE.into(),
            subtype: "division".into(),
            value: "Division Alpha".into(),
        };
        assert_eq!(
            request.path(),
            "psearch/us/meerkat/1t/division/Division%20Alpha.json"
        );
    }

    #[test]
    fn test_map_path() {
        let request = Request::MapUsage {
            map_id: "17525".into(),
        };
        assert_eq!(request.path(), "map/17525.json");
    }

    #[test]
    fn test_segments_are_encoded_independently() {
        assert_eq!(
            character("_asd, fff%\\ okay", "0").path(),
            "teams/us/_asd%2C%20fff%25%5C%20okay$0.json"
        );
        // separators inside a segment must not leak through
        assert_eq!(character("a$b!c", "-1").path(), "teams/us/a%24b%21c$-1.json");
    }

    #[test]
    fn test_multibyte_names_are_utf8_encoded() {
        assert_eq!(
            character("寰喟ж撮蹂", "0").path(),
            "teams/us/%E5%AF%B0%E5%96%9F%D0%B6%E6%92%AE%E8%B9%82$0.json"
        );
        assert_eq!(character("Dé jà", "1").path(), "teams/us/D%C3%A9%20j%C3%A0$1.json");
    }

    #[test]
    fn test_url_joins_base_and_key() {
        let key = encode_site_key("github.com/ameerkat/sc2ranks-php");
        assert_eq!(key, "github.com%2Fameerkat%2Fsc2ranks-php");

        let request = character("meerkat", "678");
        let with_slash = request.url("http://sc2ranks.com/api/base/", &key);
        let without_slash = request.url("http://sc2ranks.com/api/base", &key);
        assert_eq!(with_slash, without_slash);
        assert_eq!(
            with_slash,
            "http://sc2ranks.com/api/base/teams/us/meerkat$678.json?appKey=github.com%2Fameerkat%2Fsc2ranks-php"
        );
    }

    #[test]
    fn test_site_keys_change_only_the_query() {
        let request = character("meerkat", "678");
        let explicit = request.url("http://h/", &encode_site_key("my app"));
        let other = request.url("http://h/", &encode_site_key("localhost"));

        let (explicit_path, explicit_query) = explicit.split_once('?').unwrap();
        let (other_path, other_query) = other.split_once('?').unwrap();
        assert_eq!(explicit_path, other_path);
        assert_eq!(explicit_query, "appKey=my%20app");
        assert_eq!(other_query, "appKey=localhost");
    }
}
