use super::figma_client;
use crate::config::Config;
use crate::output;
use crate::validate::validate_image_url;
use anyhow::Result;

pub async fn run(url: &str, config: &Config) -> Result<()> {
    let client = figma_client(config)?;
    output::print_status(&format!("Fetching {}...", url));

    let image = validate_image_url(client.http(), url).await?;
    output::print_success(&format!("{} ({} bytes)", image.content_type, image.byte_len()));

    if output::is_json() {
        output::print_json(&image)?;
    } else {
        output::print_raw(&image.data_uri);
    }
    Ok(())
}
