/// Which form field an uploaded image arrived in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageField {
    Cover,
    Additional,
}

impl ImageField {
    /// Multipart field name, also used as the generated filename prefix
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageField::Cover => "coverImage",
            ImageField::Additional => "additionalImages",
        }
    }

    /// Most files one request may carry in this field
    pub fn max_files(&self) -> usize {
        match self {
            ImageField::Cover => 1,
            ImageField::Additional => super::MAX_ADDITIONAL_IMAGES,
        }
    }
}

/// One uploaded file, fully buffered, not yet written anywhere
#[derive(Debug, Clone)]
pub struct IncomingImage {
    pub field: ImageField,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// All image files carried by a single create/update request
#[derive(Debug, Clone, Default)]
pub struct ImageUploads {
    pub cover: Vec<IncomingImage>,
    pub additional: Vec<IncomingImage>,
}

impl ImageUploads {
    pub fn iter(&self) -> impl Iterator<Item = &IncomingImage> {
        self.cover.iter().chain(self.additional.iter())
    }
}

/// Generated names of files written for one request
///
/// `additional` is `Some` only when the request supplied additional images,
/// which for updates means "replace the whole set".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StagedImages {
    pub cover: Option<String>,
    pub additional: Option<Vec<String>>,
}

impl StagedImages {
    pub fn files(&self) -> Vec<String> {
        self.cover
            .iter()
            .chain(self.additional.iter().flatten())
            .cloned()
            .collect()
    }
}
