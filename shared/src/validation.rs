use crate::models::{CategoryId, PhotoId};

pub const ALLOWED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// Client-side checks. They are advisory: the server repeats every one of
/// them and its verdict wins.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Pick a favorite before you submit your vote.")]
    NoSelection,
    #[error("Your vote for this superlative is still being submitted.")]
    SubmissionInFlight,
    #[error("Pick at least one superlative before sharing your masterpiece.")]
    NoCategories,
    #[error("Please include a name so we know who to cheer for!")]
    MissingName,
    #[error("Please attach a photo to your submission.")]
    MissingPhoto,
    #[error("Only png, jpg, jpeg, and gif files are allowed.")]
    UnsupportedFileType,
    #[error("Photos must be 5 MB or smaller.")]
    FileTooLarge,
}

/// What the upload check needs to know about the attached file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhotoFileInfo<'a> {
    pub name: &'a str,
    pub size: u64,
}

pub fn validate_vote_selection(selection: Option<PhotoId>) -> Result<PhotoId, ValidationError> {
    selection.ok_or(ValidationError::NoSelection)
}

pub fn validate_upload<'a, I>(
    uploader_name: &str,
    categories: I,
    photo: Option<PhotoFileInfo<'_>>,
) -> Result<(), ValidationError>
where
    I: IntoIterator<Item = &'a CategoryId>,
{
    if categories.into_iter().next().is_none() { return Err(ValidationError::NoCategories); }
    if uploader_name.trim().is_empty() { return Err(ValidationError::MissingName); }

    let photo = photo.ok_or(ValidationError::MissingPhoto)?;
    if photo.name.is_empty() { return Err(ValidationError::MissingPhoto); }
    if !is_allowed_file(photo.name) { return Err(ValidationError::UnsupportedFileType); }
    if photo.size > MAX_UPLOAD_BYTES { return Err(ValidationError::FileTooLarge); }

    Ok(())
}

pub fn is_allowed_file(name: &str) -> bool {
    name.rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
}
