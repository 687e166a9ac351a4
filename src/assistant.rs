//! Rule-based course assistant.
//!
//! Free text is lower-cased and checked against a fixed keyword table; every
//! keyword contained in the message contributes its products.

use std::collections::HashSet;

use serde::Serialize;

use crate::catalog::Catalog;
use crate::Product;

pub const MATCHED_TEXT: &str = "Based on your request, I found these courses:";
pub const FALLBACK_TEXT: &str =
    "Sorry, I could not find a matching course. Try keywords such as \"ielts\", \"business english\" or \"pronunciation\".";

const KEYWORDS: &[(&str, &[&str])] = &[
    ("absolute beginner", &["25"]),
    ("academic english", &["1", "8", "29"]),
    ("accent reduction", &["3"]),
    ("advanced", &["20"]),
    ("advanced conversation", &["11"]),
    ("applied grammar", &["22"]),
    ("awl", &["29"]),
    ("band 8", &["1"]),
    ("business english", &["2", "19", "23", "28"]),
    ("business english communication", &["2", "12", "19", "23", "30"]),
    ("business skills", &["30"]),
    ("business writing", &["12"]),
    ("c1 advanced", &["27"]),
    ("c2 proficiency", &["10"]),
    ("cae", &["27"]),
    ("cambridge exam", &["10", "27"]),
    ("career", &["5", "26"]),
    ("common mistakes", &["15"]),
    ("communication", &["5"]),
    ("connected speech", &["20"]),
    ("contracts", &["21"]),
    ("conversation", &["7", "16", "25"]),
    ("corporate communication", &["2"]),
    ("cpe", &["1", "4", "8", "10", "13", "17", "18", "24", "27"]),
    ("daily english", &["7"]),
    ("debate", &["11"]),
    ("developer", &["9"]),
    ("email etiquette", &["12"]),
    ("english basics", &["6", "25"]),
    ("english grammar", &["6", "15", "22", "29"]),
    ("english pronunciation", &["3", "20"]),
    ("entrepreneurship", &["19"]),
    ("error correction", &["15"]),
    ("essay writing", &["13"]),
    ("exam prep", &["1", "4", "8", "17", "18", "27"]),
    ("foundation", &["6"]),
    ("general english conversation", &["7", "11", "16", "25"]),
    ("grammar", &["6", "15"]),
    ("healthcare", &["14"]),
    ("ielts", &["1", "4", "8", "10", "13", "17", "18", "24", "27"]),
    ("ielts life skills", &["24"]),
    ("intonation", &["20"]),
    ("it", &["9"]),
    ("job interview", &["5", "26"]),
    ("law", &["21"]),
    ("leadership", &["26"]),
    ("legal english", &["21"]),
    ("listening", &["4", "17", "24"]),
    ("management", &["26"]),
    ("marketing", &["28"]),
    ("mastery", &["10"]),
    ("medical english", &["14"]),
    ("networking", &["30"]),
    ("pitching", &["19"]),
    ("presentation", &["2"]),
    ("presentation skills", &["23"]),
    ("professional", &["14"]),
    ("professional english", &["9", "14", "21", "28"]),
    ("pronunciation", &["3", "20"]),
    ("public speaking", &["11", "23"]),
    ("reading", &["4"]),
    ("reporting", &["12"]),
    ("sales", &["28"]),
    ("small talk", &["30"]),
    ("speaking", &["3", "7", "18", "22", "24"]),
    ("startup", &["19"]),
    ("survival english", &["16"]),
    ("tech", &["9"]),
    (
        "tiếng anh",
        &["1", "2", "3", "5", "6", "7", "8", "9", "11", "12", "14", "15", "16", "19", "20", "21", "22", "23", "25", "26", "28", "29", "30"],
    ),
    ("toefl", &["1", "4", "8", "10", "13", "17", "18", "24", "27"]),
    ("toeic", &["1", "4", "8", "10", "13", "17", "18", "24", "27"]),
    ("travel english", &["16"]),
    ("ukvi", &["24"]),
    ("vocabulary", &["29"]),
    ("writing", &["13", "22"]),
    ("writing task 2", &["13"]),
];

#[derive(Clone, Debug, Serialize)]
pub struct Reply<'a> {
    pub text: &'static str,
    pub products: Vec<&'a Product>,
}

/// Answers `message` with every product whose keyword it mentions, in catalog order.
pub fn reply<'a>(catalog: &'a Catalog, message: &str) -> Reply<'a> {
    let message = message.to_lowercase();
    let matched: HashSet<&str> = KEYWORDS
        .iter()
        .filter(|(keyword, _)| message.contains(keyword))
        .flat_map(|(_, ids)| ids.iter().copied())
        .collect();

    let products = catalog.resolve_in_catalog_order(matched);
    let text = if products.is_empty() { FALLBACK_TEXT } else { MATCHED_TEXT };
    Reply { text, products }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids<'a>(reply: &Reply<'a>) -> Vec<&'a str> {
        reply.products.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_keyword_match_in_catalog_order() {
        let catalog = Catalog::embedded().unwrap();
        let reply = reply(&catalog, "Looking for LEGAL ENGLISH and Small Talk");
        assert_eq!(reply.text, MATCHED_TEXT);
        assert_eq!(ids(&reply), ["21", "30"]);
    }

    #[test]
    fn test_overlapping_keywords_union() {
        let catalog = Catalog::embedded().unwrap();
        let reply = reply(&catalog, "ielts writing task 2");
        // "writing" also contains the short keyword "it".
        assert_eq!(ids(&reply), ["1", "4", "8", "9", "10", "13", "17", "18", "22", "24", "27"]);
    }

    #[test]
    fn test_no_match_falls_back() {
        let catalog = Catalog::embedded().unwrap();
        let reply = reply(&catalog, "quantum physics");
        assert_eq!(reply.text, FALLBACK_TEXT);
        assert!(reply.products.is_empty());
    }

    #[test]
    fn test_every_keyword_points_into_fixture() {
        let catalog = Catalog::embedded().unwrap();
        for (keyword, ids) in KEYWORDS {
            assert!(ids.iter().all(|id| catalog.contains(id)), "dangling id under `{keyword}`");
        }
    }
}
