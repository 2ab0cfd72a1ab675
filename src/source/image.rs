use url::Url;

use crate::domain::AssetRef;
use crate::source::{AssetResolver, ContentConfig};

const IMAGE_CDN: &str = "https://cdn.sanity.io/images";

/// Builds CDN URLs for image assets of one project and dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUrlBuilder {
    project_id: String,
    dataset: String,
}

impl ImageUrlBuilder {
    pub fn new(project_id: impl Into<String>, dataset: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            dataset: dataset.into(),
        }
    }

    pub fn from_config(config: &ContentConfig) -> Self {
        Self::new(config.project_id.clone(), config.dataset.clone())
    }

    /// `image-<hash>-<w>x<h>-<ext>` → `<hash>-<w>x<h>.<ext>`
    fn asset_file_name(reference: &str) -> Option<String> {
        let rest = reference.strip_prefix("image-")?;
        let (id_and_dims, ext) = rest.rsplit_once('-')?;
        let (id, dims) = id_and_dims.rsplit_once('-')?;
        let (w, h) = dims.split_once('x')?;
        let numeric = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());

        if id.is_empty() || ext.is_empty() || !numeric(w) || !numeric(h) {
            return None;
        }
        Some(format!("{}.{}", id_and_dims, ext))
    }
}

impl AssetResolver for ImageUrlBuilder {
    fn resolve(&self, asset: &AssetRef, width: u32) -> Option<String> {
        let mut url = match asset {
            AssetRef::Reference(reference) => {
                let file = Self::asset_file_name(reference)?;
                Url::parse(&format!(
                    "{}/{}/{}/{}",
                    IMAGE_CDN, self.project_id, self.dataset, file
                ))
                .ok()?
            }
            AssetRef::Url(raw) => Url::parse(raw).ok()?,
        };

        url.query_pairs_mut().append_pair("w", &width.to_string());
        Some(url.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> ImageUrlBuilder {
        ImageUrlBuilder::new("proj", "production")
    }

    #[test]
    fn test_resolve_reference() {
        let asset = AssetRef::Reference("image-Tb9Ew8CXIwaY6R1kjMvI0uRR-2000x3000-jpg".into());
        assert_eq!(
            builder().resolve(&asset, 1200).as_deref(),
            Some("https://cdn.sanity.io/images/proj/production/Tb9Ew8CXIwaY6R1kjMvI0uRR-2000x3000.jpg?w=1200")
        );
    }

    #[test]
    fn test_resolve_url_appends_width() {
        let asset = AssetRef::Url("https://cdn.example.com/a.png?fm=webp".into());
        assert_eq!(
            builder().resolve(&asset, 80).as_deref(),
            Some("https://cdn.example.com/a.png?fm=webp&w=80")
        );
    }

    #[test]
    fn test_malformed_references_do_not_resolve() {
        for reference in [
            "file-abc-pdf",
            "image-",
            "image-abc",
            "image-abc-jpg",
            "image-abc-12xab-jpg",
            "image--10x10-jpg",
        ] {
            let asset = AssetRef::Reference(reference.into());
            assert_eq!(builder().resolve(&asset, 100), None, "{}", reference);
        }
        assert_eq!(builder().resolve(&AssetRef::Url("not a url".into()), 100), None);
    }
}
