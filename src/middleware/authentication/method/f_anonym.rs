use actix_web::dev::ServiceRequest;

/// Last resort of the chain: no user is attached to the request.
#[tracing::instrument(name = "authenticate as anonym", skip(req))]
pub fn anonym(req: &mut ServiceRequest) -> Result<bool, String> {
    tracing::debug!("anonymous request to {}", req.path());
    Ok(true)
}
