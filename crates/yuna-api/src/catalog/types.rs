use serde::Deserialize;

use yuna_core::models::CatalogEntry;

// ── Jikan response types ────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub data: Vec<AnimeItem>,
}

#[derive(Debug, Deserialize)]
pub struct AnimeItem {
    pub mal_id: u64,
    pub title: String,
    pub images: Option<ImageFormats>,
}

#[derive(Debug, Deserialize)]
pub struct ImageFormats {
    pub jpg: Option<ImageSet>,
}

#[derive(Debug, Deserialize)]
pub struct ImageSet {
    pub image_url: Option<String>,
}

// ── Conversions ─────────────────────────────────────────────────

impl AnimeItem {
    pub fn into_catalog_entry(self) -> CatalogEntry {
        CatalogEntry {
            id: self.mal_id.to_string(),
            title: self.title,
            image_url: self.images.and_then(|i| i.jpg).and_then(|j| j.image_url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_search_response() {
        let json = r#"{
            "data": [
                {
                    "mal_id": 20,
                    "title": "Naruto",
                    "images": {
                        "jpg": {
                            "image_url": "https://cdn.myanimelist.net/images/anime/13/17405.jpg",
                            "small_image_url": "https://cdn.myanimelist.net/images/anime/13/17405t.jpg"
                        },
                        "webp": {
                            "image_url": "https://cdn.myanimelist.net/images/anime/13/17405.webp"
                        }
                    },
                    "episodes": 220,
                    "status": "Finished Airing"
                }
            ],
            "pagination": { "has_next_page": true }
        }"#;

        let resp: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.data.len(), 1);

        let entry = resp.data.into_iter().next().unwrap().into_catalog_entry();
        assert_eq!(entry.id, "20");
        assert_eq!(entry.title, "Naruto");
        assert_eq!(
            entry.image_url.as_deref(),
            Some("https://cdn.myanimelist.net/images/anime/13/17405.jpg")
        );
    }

    #[test]
    fn test_item_without_images() {
        let json = r#"{ "mal_id": 1, "title": "Cowboy Bebop" }"#;
        let item: AnimeItem = serde_json::from_str(json).unwrap();
        let entry = item.into_catalog_entry();
        assert_eq!(entry.id, "1");
        assert!(entry.image_url.is_none());
    }
}
