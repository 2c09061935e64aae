use aws_config::{BehaviorVersion, Region, SdkConfig};

/// 用預設的 credential chain 建立共用的 SDK 設定
pub async fn load_sdk_config(region: Option<&str>, endpoint_url: Option<&str>) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());

    if let Some(region) = region {
        tracing::debug!("Using region override: {}", region);
        loader = loader.region(Region::new(region.to_string()));
    }

    if let Some(endpoint_url) = endpoint_url {
        tracing::debug!("Using endpoint override: {}", endpoint_url);
        loader = loader.endpoint_url(endpoint_url);
    }

    loader.load().await
}

/// 自訂 endpoint (LocalStack、MinIO) 需要 path-style 位址
pub fn s3_client(sdk_config: &SdkConfig, force_path_style: bool) -> aws_sdk_s3::Client {
    let config = aws_sdk_s3::config::Builder::from(sdk_config)
        .force_path_style(force_path_style)
        .build();
    aws_sdk_s3::Client::from_conf(config)
}

pub fn textract_client(sdk_config: &SdkConfig) -> aws_sdk_textract::Client {
    aws_sdk_textract::Client::new(sdk_config)
}
