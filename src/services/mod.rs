// Services layer - image lifecycle and enquiry notification
pub mod enquiry_notifier;
pub mod image_lifecycle;

pub use enquiry_notifier::EnquiryNotifier;
pub use image_lifecycle::{
    check_file_count, generate_filename, ImageLifecycleManager, UploadLimits, DEFAULT_MAX_FILE_BYTES,
};
