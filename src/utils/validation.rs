use crate::utils::error::{Result, TextractError};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Textract 非同步作業接受的格式
pub const ASYNC_DOCUMENT_EXTENSIONS: &[&str] = &["pdf", "png", "jpg", "jpeg", "tif", "tiff"];

/// AnalyzeID 只接受單頁影像
pub const IDENTITY_DOCUMENT_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(TextractError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(TextractError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(TextractError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(TextractError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(TextractError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_existing_file(field_name: &str, path: &str) -> Result<()> {
    if !std::path::Path::new(path).is_file() {
        return Err(TextractError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "File does not exist or is not a regular file".to_string(),
        });
    }
    Ok(())
}

pub fn validate_document_extension(
    field_name: &str,
    file: &str,
    allowed_extensions: &[&str],
) -> Result<()> {
    let extension = std::path::Path::new(file)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension {
        Some(ext) if allowed_extensions.contains(&ext.as_str()) => Ok(()),
        Some(ext) => Err(TextractError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: format!(
                "Unsupported document type: {}. Allowed extensions: {}",
                ext,
                allowed_extensions.join(", ")
            ),
        }),
        None => Err(TextractError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: "File has no extension or invalid filename".to_string(),
        }),
    }
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value
        .as_ref()
        .ok_or_else(|| TextractError::MissingConfigError {
            field: field_name.to_string(),
        })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(TextractError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(TextractError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_s3_bucket_name(field_name: &str, bucket_name: &str) -> Result<()> {
    let invalid = |reason: &str| TextractError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: bucket_name.to_string(),
        reason: reason.to_string(),
    };

    if bucket_name.is_empty() {
        return Err(invalid("S3 bucket name cannot be empty"));
    }

    if bucket_name.len() < 3 || bucket_name.len() > 63 {
        return Err(invalid("S3 bucket name must be between 3 and 63 characters"));
    }

    if !bucket_name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.')
    {
        return Err(invalid(
            "S3 bucket name can only contain lowercase letters, numbers, hyphens, and dots",
        ));
    }

    if bucket_name.starts_with('-') || bucket_name.ends_with('-') {
        return Err(invalid("S3 bucket name cannot start or end with a hyphen"));
    }

    Ok(())
}

pub fn validate_aws_region(field_name: &str, region: &str) -> Result<()> {
    validate_non_empty_string(field_name, region)?;

    if !region
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(TextractError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: region.to_string(),
            reason: "AWS region can only contain lowercase letters, numbers, and hyphens"
                .to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("endpoint_url", "https://textract.us-east-1.amazonaws.com").is_ok());
        assert!(validate_url("endpoint_url", "http://localhost:4566").is_ok());
        assert!(validate_url("endpoint_url", "").is_err());
        assert!(validate_url("endpoint_url", "invalid-url").is_err());
        assert!(validate_url("endpoint_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_bucket_name() {
        assert!(validate_s3_bucket_name("bucket", "my-docs.2024").is_ok());
        assert!(validate_s3_bucket_name("bucket", "ab").is_err());
        assert!(validate_s3_bucket_name("bucket", "My_Bucket").is_err());
        assert!(validate_s3_bucket_name("bucket", "-leading").is_err());
        assert!(validate_s3_bucket_name("bucket", "trailing-").is_err());
    }

    #[test]
    fn test_validate_region() {
        assert!(validate_aws_region("region", "eu-west-1").is_ok());
        assert!(validate_aws_region("region", "").is_err());
        assert!(validate_aws_region("region", "EU_WEST_1").is_err());
    }

    #[test]
    fn test_validate_document_extension() {
        assert!(validate_document_extension("file", "scan.PDF", ASYNC_DOCUMENT_EXTENSIONS).is_ok());
        assert!(validate_document_extension("file", "id.jpeg", IDENTITY_DOCUMENT_EXTENSIONS).is_ok());
        assert!(
            validate_document_extension("file", "scan.pdf", IDENTITY_DOCUMENT_EXTENSIONS).is_err()
        );
        assert!(validate_document_extension("file", "README", ASYNC_DOCUMENT_EXTENSIONS).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("poll_interval_ms", 1000u64, 10, 60_000).is_ok());
        assert!(validate_range("poll_interval_ms", 5u64, 10, 60_000).is_err());
    }
}
