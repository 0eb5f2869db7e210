//! CVE search command implementations
//!
//! Arguments reach these handlers already validated by clap. Each command
//! then resolves its server, confirms the server supports the query and runs
//! it.

use log::debug;

use crate::cli::SearchContext;
use crate::cli::args::{CveListSort, GlobalOptions, ImageListSort};
use crate::cli::validate::ImageRef;
use crate::client::query::{CVE_LIST_FOR_IMAGE, IMAGE_LIST_FOR_CVE, IMAGE_LIST_WITH_CVE_FIXED};
use crate::client::{CveResultForImage, PaginatedImages, SearchApi, ensure_supported};
use crate::error::Result;
use crate::output::Formattable;
use crate::output::progress::spinner;

/// Run the `cve list` command
pub async fn list(
    image: &ImageRef,
    cve_id: Option<&str>,
    sort: CveListSort,
    opts: &GlobalOptions,
) -> Result<()> {
    let ctx = SearchContext::new(opts)?;
    let image = image.to_string();

    let progress = spinner(format!("Searching CVEs in {} on {}", image, ctx.config.base_url));
    let result = search_cves(&ctx.client, &image, cve_id, sort).await;
    progress.finish_and_clear();

    result?.print(ctx.format)
}

/// Run the `cve affected` command
pub async fn affected(
    cve_id: &str,
    repo: &str,
    sort: ImageListSort,
    opts: &GlobalOptions,
) -> Result<()> {
    let ctx = SearchContext::new(opts)?;

    let progress = spinner(format!(
        "Searching images affected by {} on {}",
        cve_id, ctx.config.base_url
    ));
    let result = search_affected(&ctx.client, cve_id, repo, sort).await;
    progress.finish_and_clear();

    result?.print(ctx.format)
}

/// Run the `cve fixed` command
pub async fn fixed(
    repo: &str,
    cve_id: &str,
    sort: ImageListSort,
    opts: &GlobalOptions,
) -> Result<()> {
    let ctx = SearchContext::new(opts)?;

    let progress = spinner(format!(
        "Searching {} tags with {} fixed on {}",
        repo, cve_id, ctx.config.base_url
    ));
    let result = search_fixed(&ctx.client, repo, cve_id, sort).await;
    progress.finish_and_clear();

    result?.print(ctx.format)
}

/// Check support for `CVEListForImage`, then list the image's CVEs.
pub async fn search_cves<A>(
    api: &A,
    image: &str,
    searched_cve: Option<&str>,
    sort: CveListSort,
) -> Result<CveResultForImage>
where
    A: SearchApi + ?Sized,
{
    ensure_supported(api, &CVE_LIST_FOR_IMAGE).await?;

    debug!("Listing CVEs for {} (sort={})", image, sort);
    let result = api.cve_list_for_image(image, searched_cve, sort).await?;
    debug!("Found {} CVEs in {}", result.cve_list.len(), image);

    Ok(result)
}

/// Check support for `ImageListForCVE`, then list affected images.
///
/// An empty `repo` searches every repository.
pub async fn search_affected<A>(
    api: &A,
    cve_id: &str,
    repo: &str,
    sort: ImageListSort,
) -> Result<PaginatedImages>
where
    A: SearchApi + ?Sized,
{
    ensure_supported(api, &IMAGE_LIST_FOR_CVE).await?;

    debug!(
        "Listing images affected by {} (repo='{}', sort={})",
        cve_id, repo, sort
    );
    let images = api.image_list_for_cve(cve_id, repo, sort).await?;
    debug!("Found {} affected images", images.results.len());

    Ok(images)
}

/// Check support for `ImageListWithCVEFixed`, then list fixed tags.
pub async fn search_fixed<A>(
    api: &A,
    repo: &str,
    cve_id: &str,
    sort: ImageListSort,
) -> Result<PaginatedImages>
where
    A: SearchApi + ?Sized,
{
    ensure_supported(api, &IMAGE_LIST_WITH_CVE_FIXED).await?;

    debug!("Listing {} tags with {} fixed (sort={})", repo, cve_id, sort);
    let images = api.image_list_with_cve_fixed(cve_id, repo, sort).await?;
    debug!("Found {} fixed tags", images.results.len());

    Ok(images)
}
