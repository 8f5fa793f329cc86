use crate::{api::recap, config::Config};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;

/// Milliseconds between replenished requests, never zero.
fn replenish_ms(requests_per_min: u32) -> u64 {
    (60_000 / requests_per_min.max(1) as u64).max(1)
}

// Helper to build per-route limiter
fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
    let burst = requests_per_min.max(1);
    let cfg = GovernorConfigBuilder::default()
        .milliseconds_per_request(replenish_ms(requests_per_min))
        .burst_size(burst)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .expect("period and burst are both non-zero");
    Governor::new(&cfg)
}

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config) {
    cfg.service(
        web::scope(&config.api_prefix).service(
            // /rekap
            web::resource("/rekap")
                .wrap(build_limiter(config.rate_recap_per_min))
                .route(web::post().to(recap::create_recap)),
        ),
    );
}
