use std::path::Path;

use anyhow::Result;

use crate::net::Fetcher;
use crate::pipeline::{self, Report, Target};
use crate::records;
use crate::sources::Source;

/// The five data kinds scraped from genshin-db, in driver order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Weapons,
    Materials,
    CharacterDevelopmentItems,
    Artifacts,
    Characters,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Weapons,
        Category::Materials,
        Category::CharacterDevelopmentItems,
        Category::Artifacts,
        Category::Characters,
    ];

    /// Key of this category in the source table.
    pub fn source_name(self) -> &'static str {
        match self {
            Category::Weapons => "weapons",
            Category::Materials => "materials",
            Category::CharacterDevelopmentItems => "crafts",
            Category::Artifacts => "artifacts",
            Category::Characters => "characters",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Weapons => "Weapon",
            Category::Materials => "Material",
            Category::CharacterDevelopmentItems => "Character Development Item",
            Category::Artifacts => "Artifact",
            Category::Characters => "Character",
        }
    }

    pub fn noun(self) -> &'static str {
        match self {
            Category::Weapons => "weapons",
            Category::Materials => "materials",
            Category::CharacterDevelopmentItems => "character development items",
            Category::Artifacts => "artifact sets",
            Category::Characters => "characters",
        }
    }

    pub fn target(self, source: &Source) -> Target<'_> {
        Target {
            label: self.label(),
            noun: self.noun(),
            url: source.url(),
            exclusion: source.exclude().into(),
            output: source.output(),
        }
    }

    /// Run the pipeline for this category with its own record shape.
    pub async fn scrape(self, fetcher: &dyn Fetcher, source: &Source, out_dir: &Path) -> Result<Report> {
        let target = self.target(source);
        match self {
            Category::Weapons => pipeline::run(fetcher, &target, records::weapon, out_dir).await,
            Category::Artifacts => pipeline::run(fetcher, &target, records::artifact, out_dir).await,
            Category::Materials | Category::CharacterDevelopmentItems | Category::Characters => {
                pipeline::run(fetcher, &target, records::named, out_dir).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Category;
    use crate::net::fake::FakeFetcher;
    use crate::sources::{BUNDLED_SOURCES, Source, parse};

    const RAW: &str = "https://raw.githubusercontent.com/theBowja/genshin-db/main/src/data/English";

    fn bundled(name: &str) -> Source {
        parse(BUNDLED_SOURCES)
            .unwrap()
            .into_iter()
            .find(|s| s.name() == name)
            .unwrap()
    }

    fn anchor(dir: &str, file: &str) -> String {
        format!(
            r#"<a class="js-navigation-open Link--primary" href="/theBowja/genshin-db/blob/main/src/data/English/{dir}/{file}">{file}</a>"#
        )
    }

    #[test]
    fn every_category_has_a_bundled_source() {
        let sources = parse(BUNDLED_SOURCES).unwrap();
        for category in Category::ALL {
            assert!(sources.iter().any(|s| s.name() == category.source_name()));
        }
    }

    #[test]
    fn weapon_target_excludes_the_reserved_entry() {
        let source = bundled("weapons");
        let target = Category::Weapons.target(&source);
        assert!(target.exclusion.excludes("/x/blob/main/weapons/prizedisshinblade.json"));
        assert_eq!(target.output, "weapons.json");

        let source = bundled("materials");
        assert!(!Category::Materials.target(&source).exclusion.excludes("prizedisshinblade"));
    }

    #[tokio::test]
    async fn artifacts_write_six_ordered_keys() {
        let dir = tempfile::tempdir().unwrap();
        let source = bundled("artifacts");
        let fetcher = FakeFetcher::default()
            .with_page(source.url(), &anchor("artifacts", "noblesseoblige.json"))
            .with_page(
                &format!("{RAW}/artifacts/noblesseoblige.json"),
                r#"{
                    "name": "Noblesse Oblige",
                    "circlet": {"name": "Royal Masque"},
                    "goblet": {"name": "Royal Silver Urn"},
                    "sands": {"name": "Royal Pocket Watch"},
                    "plume": {"name": "Royal Plume"},
                    "flower": {"name": "Royal Flora"}
                }"#,
            );

        let report = Category::Artifacts
            .scrape(&fetcher, &source, dir.path())
            .await
            .unwrap();

        assert_eq!(report.written, 1);
        let text = std::fs::read_to_string(dir.path().join("artifacts.json")).unwrap();
        let keys: Vec<&str> = text
            .lines()
            .filter_map(|line| line.trim().strip_prefix('"'))
            .filter_map(|rest| rest.split('"').next())
            .collect();
        assert_eq!(keys, ["name", "flower", "plume", "sands", "goblet", "circlet"]);
        assert!(text.contains("\"sands\": \"RoyalPocketWatch\""));
    }

    #[tokio::test]
    async fn weapons_skip_reserved_entry_and_keep_rarity() {
        let dir = tempfile::tempdir().unwrap();
        let source = bundled("weapons");
        let listing = [
            anchor("weapons", "akuoumaru.json"),
            anchor("weapons", "prizedisshinblade.json"),
        ]
        .concat();
        let fetcher = FakeFetcher::default()
            .with_page(source.url(), &listing)
            .with_page(
                &format!("{RAW}/weapons/akuoumaru.json"),
                r#"{"name": "Akuoumaru", "rarity": "4"}"#,
            );

        let report = Category::Weapons
            .scrape(&fetcher, &source, dir.path())
            .await
            .unwrap();

        assert_eq!((report.attempted, report.written), (1, 1));
        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(report.output).unwrap()).unwrap();
        assert_eq!(written, serde_json::json!([{ "name": "Akuoumaru", "rarity": "4" }]));
    }
}
