use crate::extract::{ExtractionResult, HeadingLevel, ImageEntry};
use crate::liveness::{broken_links, LivenessVerdict};
use crate::report::enrichment::EnrichmentData;
use crate::seo::{seo_friendly_status, ssl_status, SslStatus};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// The final response for one scrape
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeReport {
    pub meta_description: Option<String>,

    pub internal_links: Vec<String>,

    pub external_links: Vec<String>,

    /// `null` when the page has no images
    pub images: Option<Vec<ImageEntry>>,

    /// `null` when the page has no images
    pub image_alt_tags: Option<Vec<String>>,

    pub tag_data: BTreeMap<HeadingLevel, Vec<String>>,

    /// Unreachable URLs, in discovery order
    pub broken_links: Vec<String>,

    pub seo_friendly_status: String,

    #[serde(rename = "hasSSL")]
    pub has_ssl: SslStatus,

    pub mobile_metrics: Option<Value>,

    pub desktop_metrics: Option<Value>,

    pub domain_authority_data: Option<Value>,

    /// Per-URL probe outcomes behind `broken_links`
    #[serde(skip)]
    pub verdicts: Vec<LivenessVerdict>,
}

impl ScrapeReport {
    /// Composes extraction, liveness, heuristics and enrichment results
    ///
    /// `target` is the URL as submitted; the SEO heuristics read it verbatim.
    pub fn new(
        extraction: ExtractionResult,
        verdicts: Vec<LivenessVerdict>,
        target: &str,
        enrichment: EnrichmentData,
    ) -> Self {
        let has_images = !extraction.images.is_empty();

        Self {
            meta_description: extraction.meta_description,
            internal_links: extraction.internal_links,
            external_links: extraction.external_links,
            images: has_images.then_some(extraction.images),
            image_alt_tags: has_images.then_some(extraction.image_alt_tags),
            tag_data: extraction.headings,
            broken_links: broken_links(&verdicts),
            seo_friendly_status: seo_friendly_status(target).to_string(),
            has_ssl: ssl_status(target),
            mobile_metrics: enrichment.mobile_metrics,
            desktop_metrics: enrichment.desktop_metrics,
            domain_authority_data: enrichment.domain_authority,
            verdicts,
        }
    }
}
