//! Product Image Handlers

use salvo::{
    http::header::{CONTENT_TYPE, HeaderValue},
    oapi::extract::PathParam,
    prelude::*,
};
use tokio::fs;

use stockroom_app::domain::{
    errors::ErrorKind,
    images::{ImageStoreError, MAX_IMAGE_BYTES, format::ImageFormat},
    products::records::ProductId,
};

use crate::{
    errors::{image_status_error, into_status_error},
    extensions::*,
    products::get::ProductResponse,
};

/// Multipart field carrying the upload.
const IMAGE_FIELD: &str = "image";

/// Room for multipart framing on top of the image itself.
pub(crate) const MAX_UPLOAD_BYTES: usize = MAX_IMAGE_BYTES + (64 << 10);

/// Upload Product Image Handler
///
/// Accepts a JPEG or PNG of at most 5 MiB in the `image` field of a
/// multipart form and makes it the product's current image.
#[endpoint(
    tags("products"),
    summary = "Upload Product Image",
    responses(
        (status_code = StatusCode::OK, description = "Image stored"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing or unsupported image"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::PAYLOAD_TOO_LARGE, description = "Image exceeds 5 MiB"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn upload_handler(
    product: PathParam<i64>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let product = ProductId::new(product.into_inner());

    state
        .app
        .products
        .get_product(product)
        .await
        .map_err(into_status_error)?;

    req.set_secure_max_size(MAX_UPLOAD_BYTES);

    let file = req.file(IMAGE_FIELD).await.ok_or_else(|| {
        StatusError::bad_request()
            .brief("multipart field \"image\" is required")
            .detail(ErrorKind::InvalidArgument.as_str())
    })?;

    if usize::try_from(file.size()).map_or(true, |size| size > MAX_IMAGE_BYTES) {
        return Err(image_status_error(ImageStoreError::TooLarge));
    }

    let file_name = file.name().unwrap_or_default().to_owned();

    let bytes = fs::read(file.path())
        .await
        .or_500("failed to read uploaded image")?;

    let path = state
        .app
        .images
        .save(product, file_name, bytes)
        .await
        .map_err(image_status_error)?;

    let product = state
        .app
        .products
        .set_image_path(product, path.to_string_lossy().into_owned())
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}

/// Get Product Image Handler
///
/// Serves the product's most recently uploaded image.
#[endpoint(
    tags("products"),
    summary = "Get Product Image",
    responses(
        (status_code = StatusCode::OK, description = "Image bytes"),
        (status_code = StatusCode::NOT_FOUND, description = "No image for product"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn get_handler(
    product: PathParam<i64>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.state_or_500()?;

    let path = state
        .app
        .images
        .latest(ProductId::new(product.into_inner()))
        .await
        .map_err(image_status_error)?;

    let format = ImageFormat::from_path(&path).ok_or_else(|| {
        tracing::error!(path = %path.display(), "stored image has an unknown extension");

        StatusError::internal_server_error()
    })?;

    let bytes = fs::read(&path).await.or_500("failed to read stored image")?;

    res.headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(format.content_type()));
    res.write_body(bytes).or_500("failed to write image body")?;

    Ok(())
}
