//! Reachability check: HEAD request that must end in HTTP 200.

use curl::easy::Easy;

use super::headers::ResponseHead;
use super::{configure, UnreachableReason};
use crate::config::FetchConfig;

/// Issues a HEAD request for `url`. Any final status other than 200, or a transport
/// failure, means the resource is not accessible.
pub(crate) fn probe(url: &str, cfg: &FetchConfig) -> Result<ResponseHead, UnreachableReason> {
    let mut head = ResponseHead::default();

    let mut easy = Easy::new();
    configure(&mut easy, url, cfg)?;
    easy.nobody(true)?;

    {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            head.feed(data);
            true
        })?;
        transfer.perform()?;
    }

    let code = easy.response_code()?;
    tracing::debug!("HEAD {} -> {} ({:?})", url, code, head.content_length);
    if code != 200 {
        return Err(UnreachableReason::Status(code));
    }
    Ok(head)
}
