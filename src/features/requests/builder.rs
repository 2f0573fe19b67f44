//! Provider URL composition
//!
//! Pure string composition: typed parameters in, a ready-to-fetch
//! [`RemoteResourceRequest`] out. Sizes are embedded positionally, a
//! category becomes the last path segment and text settings become path
//! flags, the way the providers expect them.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use bitflags::bitflags;
use std::fmt;

use crate::core::{Dimension, PlaceError, ProviderEndpoints};

/// Remote image services, one URL template each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageProvider {
    Kitten,
    GreyscaleKitten,
    Bacon,
    PlaceHolder,
    Random,
    GreyscaleRandom,
}

impl ImageProvider {
    pub const ALL: [ImageProvider; 6] = [
        ImageProvider::Kitten,
        ImageProvider::GreyscaleKitten,
        ImageProvider::Bacon,
        ImageProvider::PlaceHolder,
        ImageProvider::Random,
        ImageProvider::GreyscaleRandom,
    ];

    /// Only the random-image service sorts its pictures into categories
    pub fn accepts_category(&self) -> bool {
        matches!(self, ImageProvider::Random | ImageProvider::GreyscaleRandom)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ImageProvider::Kitten => "kitten",
            ImageProvider::GreyscaleKitten => "greyscale kitten",
            ImageProvider::Bacon => "bacon",
            ImageProvider::PlaceHolder => "placeholder",
            ImageProvider::Random => "random",
            ImageProvider::GreyscaleRandom => "greyscale random",
        }
    }
}

impl fmt::Display for ImageProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Requested verbosity of each generated paragraph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParagraphLength {
    VeryShort = 0,
    Short,
    #[default]
    Medium,
    Long,
    VeryLong,
}

impl ParagraphLength {
    /// Length keyword understood by the text service.
    ///
    /// The service has four levels, so `VeryShort` and `Short` share `short`.
    pub fn keyword(&self) -> &'static str {
        match self {
            ParagraphLength::VeryShort | ParagraphLength::Short => "short",
            ParagraphLength::Medium => "medium",
            ParagraphLength::Long => "long",
            ParagraphLength::VeryLong => "verylong",
        }
    }
}

bitflags! {
    /// Independent formatting flags for generated text, combinable with `|`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TextOptions: u8 {
        /// Upper-case the whole text
        const ALL_CAPS = 1 << 0;
        /// Ask the service to leave out words that might offend
        const PRUDE = 1 << 1;
    }
}

/// What the response body is expected to contain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseKind {
    Image,
    Text,
}

/// Fully composed identifier for one remote resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteResourceRequest {
    url: String,
    kind: ResponseKind,
}

impl RemoteResourceRequest {
    pub fn new(url: impl Into<String>, kind: ResponseKind) -> Self {
        RemoteResourceRequest {
            url: url.into(),
            kind,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn kind(&self) -> ResponseKind {
        self.kind
    }
}

/// Trim a category and check it can travel as one path segment.
///
/// Blank categories mean "unconstrained" and come back as `None`.
pub fn normalize_category(category: Option<&str>) -> Result<Option<&str>, PlaceError> {
    let Some(category) = category.map(str::trim).filter(|c| !c.is_empty()) else {
        return Ok(None);
    };
    if !category
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(PlaceError::invalid(format!(
            "category must be letters, digits, '-' or '_': {category:?}"
        )));
    }
    Ok(Some(category))
}

#[derive(Debug, Clone, Default)]
pub struct RequestBuilder {
    endpoints: ProviderEndpoints,
}

impl RequestBuilder {
    pub fn new(endpoints: ProviderEndpoints) -> Self {
        RequestBuilder { endpoints }
    }

    pub fn endpoints(&self) -> &ProviderEndpoints {
        &self.endpoints
    }

    /// Compose the image URL for `provider` at `size`
    pub fn image(
        &self,
        provider: ImageProvider,
        size: Dimension,
        category: Option<&str>,
    ) -> Result<RemoteResourceRequest, PlaceError> {
        size.validate()?;
        let category = normalize_category(category)?;
        if category.is_some() && !provider.accepts_category() {
            return Err(PlaceError::invalid(format!(
                "{provider} images do not take a category"
            )));
        }

        let (w, h) = (size.pixel_width(), size.pixel_height());
        let e = &self.endpoints;
        let mut url = match provider {
            ImageProvider::Kitten => format!("{}/{w}/{h}", e.kitten),
            ImageProvider::GreyscaleKitten => format!("{}/g/{w}/{h}", e.kitten),
            ImageProvider::Bacon => format!("{}/{w}/{h}", e.bacon),
            ImageProvider::PlaceHolder => format!("{}/{w}x{h}", e.placeholder),
            ImageProvider::Random => format!("{}/{w}/{h}", e.random_image),
            ImageProvider::GreyscaleRandom => format!("{}/g/{w}/{h}", e.random_image),
        };
        if let Some(category) = category {
            url.push('/');
            url.push_str(category);
        }

        Ok(RemoteResourceRequest::new(url, ResponseKind::Image))
    }

    /// Compose the filler-text URL.
    ///
    /// Text is always requested as plain text, never HTML.
    pub fn text(
        &self,
        paragraphs: u32,
        length: ParagraphLength,
        options: TextOptions,
    ) -> Result<RemoteResourceRequest, PlaceError> {
        if paragraphs == 0 {
            return Err(PlaceError::invalid("text needs at least one paragraph"));
        }

        let mut url = format!("{}/{paragraphs}/{}", self.endpoints.text, length.keyword());
        if options.contains(TextOptions::ALL_CAPS) {
            url.push_str("/allcaps");
        }
        if options.contains(TextOptions::PRUDE) {
            url.push_str("/prude");
        }
        url.push_str("/plaintext");

        Ok(RemoteResourceRequest::new(url, ResponseKind::Text))
    }
}
