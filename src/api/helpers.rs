use poem_openapi::types::multipart::Upload;

use crate::errors::{CatalogError, InternalError};
use crate::services::{check_file_count, UploadLimits};
use crate::types::dto::items::ItemForm;
use crate::types::internal::{ImageField, ImageUploads, IncomingImage, ItemFields};

/// Buffer every file of one multipart field
///
/// Each file's size is checked before any file is read into memory.
async fn read_uploads(
    field: ImageField,
    uploads: Vec<Upload>,
    limits: UploadLimits,
) -> Result<Vec<IncomingImage>, CatalogError> {
    for upload in &uploads {
        limits
            .check_size(field, upload.size())
            .map_err(InternalError::from)?;
    }

    let mut images = Vec::with_capacity(uploads.len());
    for upload in uploads {
        let file_name = upload.file_name().map(str::to_string);
        let content_type = upload.content_type().map(str::to_string);
        let bytes = upload
            .into_vec()
            .await
            .map_err(|e| InternalError::parse(field.as_str(), format!("unreadable upload: {}", e)))?;

        images.push(IncomingImage {
            field,
            file_name,
            content_type,
            bytes,
        });
    }
    Ok(images)
}

/// Split a create/update form into text fields and buffered images
///
/// File counts for both fields are checked first, so an over-count request
/// never buffers a file.
pub async fn read_item_form(
    form: ItemForm,
    limits: UploadLimits,
) -> Result<(ItemFields, ImageUploads), CatalogError> {
    let fields = ItemFields {
        name: form.name,
        item_type: form.item_type,
        description: form.description,
    };

    check_file_count(ImageField::Cover, form.cover_image.len()).map_err(InternalError::from)?;
    check_file_count(ImageField::Additional, form.additional_images.len())
        .map_err(InternalError::from)?;

    let uploads = ImageUploads {
        cover: read_uploads(ImageField::Cover, form.cover_image, limits).await?,
        additional: read_uploads(ImageField::Additional, form.additional_images, limits).await?,
    };

    Ok((fields, uploads))
}
