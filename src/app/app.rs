use axum::http::HeaderValue;
use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::{AdminUserConfig, AppConfig, JwtConfig, MinioConfig, MongoConfig};
use crate::middlewares::admin_middleware::AdminAuthState;
use crate::repository::document_store::{DocumentStore, MongoDocumentStore};
use crate::router::auth_router::auth_router;
use crate::router::banner_router::banner_router;
use crate::router::blog_router::blog_router;
use crate::router::booking_router::booking_router;
use crate::router::gallery_router::gallery_router;
use crate::router::proposal_router::proposal_router;
use crate::router::restaurant_router::restaurant_router;
use crate::router::room_router::room_router;
use crate::router::testimonial_router::testimonial_router;
use crate::router::upload_router::upload_router;
use crate::service::auth_service::AuthServiceImpl;
use crate::service::banner_service::BannerServiceImpl;
use crate::service::blog_service::BlogServiceImpl;
use crate::service::booking_service::BookingServiceImpl;
use crate::service::gallery_service::GalleryServiceImpl;
use crate::service::proposal_service::ProposalServiceImpl;
use crate::service::restaurant_service::RestaurantServiceImpl;
use crate::service::room_service::RoomServiceImpl;
use crate::service::testimonial_service::TestimonialServiceImpl;
use crate::service::upload_service::UploadServiceImpl;
use crate::util::jwt::JwtTokenUtilsImpl;
use crate::util::minio::{ImageHost, MinioService};

/// Every service the router needs, all sharing one document store.
pub struct AppServices {
    pub banner_service: Arc<BannerServiceImpl>,
    pub room_service: Arc<RoomServiceImpl>,
    pub restaurant_service: Arc<RestaurantServiceImpl>,
    pub booking_service: Arc<BookingServiceImpl>,
    pub blog_service: Arc<BlogServiceImpl>,
    pub testimonial_service: Arc<TestimonialServiceImpl>,
    pub proposal_service: Arc<ProposalServiceImpl>,
    pub gallery_service: Arc<GalleryServiceImpl>,
    pub upload_service: Arc<UploadServiceImpl>,
    pub auth_service: Arc<AuthServiceImpl>,
}

impl AppServices {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        image_host: Arc<dyn ImageHost>,
        upload_max_bytes: usize,
        auth_service: Arc<AuthServiceImpl>,
    ) -> Self {
        AppServices {
            banner_service: Arc::new(BannerServiceImpl::new(store.clone())),
            room_service: Arc::new(RoomServiceImpl::new(store.clone())),
            restaurant_service: Arc::new(RestaurantServiceImpl::new(store.clone())),
            booking_service: Arc::new(BookingServiceImpl::new(store.clone())),
            blog_service: Arc::new(BlogServiceImpl::new(store.clone())),
            testimonial_service: Arc::new(TestimonialServiceImpl::new(store.clone())),
            proposal_service: Arc::new(ProposalServiceImpl::new(store.clone())),
            gallery_service: Arc::new(GalleryServiceImpl::new(store)),
            upload_service: Arc::new(UploadServiceImpl::new(image_host, upload_max_bytes)),
            auth_service,
        }
    }

    pub fn admin_auth_state(&self) -> Arc<AdminAuthState> {
        Arc::new(AdminAuthState {
            jwt_utils: self.auth_service.jwt_utils.clone(),
            auth_service: self.auth_service.clone(),
        })
    }
}

fn cors_layer(cors_origin: Option<&str>) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    match cors_origin.map(HeaderValue::from_str) {
        Some(Ok(origin)) => layer.allow_origin(origin),
        Some(Err(e)) => {
            warn!("Ignoring invalid CORS_ORIGIN ({}), allowing any origin", e);
            layer.allow_origin(Any)
        }
        None => layer.allow_origin(Any),
    }
}

/// Full API surface: every resource router, `/health`, CORS and request tracing.
pub fn create_router(services: &AppServices, cors_origin: Option<&str>) -> Router {
    let admin_auth_state = services.admin_auth_state();
    Router::new()
        .merge(banner_router(services.banner_service.clone(), admin_auth_state.clone()))
        .merge(room_router(services.room_service.clone(), admin_auth_state.clone()))
        .merge(restaurant_router(services.restaurant_service.clone(), admin_auth_state.clone()))
        .merge(booking_router(services.booking_service.clone(), admin_auth_state.clone()))
        .merge(blog_router(services.blog_service.clone(), admin_auth_state.clone()))
        .merge(testimonial_router(services.testimonial_service.clone(), admin_auth_state.clone()))
        .merge(proposal_router(services.proposal_service.clone(), admin_auth_state.clone()))
        .merge(gallery_router(services.gallery_service.clone(), admin_auth_state.clone()))
        .merge(upload_router(services.upload_service.clone(), admin_auth_state.clone()))
        .merge(auth_router(services.auth_service.clone(), admin_auth_state))
        .route("/health", get(|| async { "OK" }))
        .layer(cors_layer(cors_origin))
        .layer(TraceLayer::new_for_http())
}

pub struct App {
    config: AppConfig,
    router: Router,
}

impl App {
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let config = AppConfig::from_env();
        let mongo_config = MongoConfig::from_env()?;
        let minio_config = MinioConfig::from_env()?;
        let jwt_config = JwtConfig::from_env()?;
        let admin_config = AdminUserConfig::from_env()?;

        // Connects lazily on the first request
        let store: Arc<dyn DocumentStore> = Arc::new(MongoDocumentStore::new(mongo_config));

        let upload_max_bytes = minio_config.upload_max_bytes;
        let image_host: Arc<dyn ImageHost> = Arc::new(MinioService::new(minio_config).await?);

        let jwt_utils = Arc::new(JwtTokenUtilsImpl::new(jwt_config));
        let auth_service = Arc::new(AuthServiceImpl::new(&admin_config, jwt_utils)?);
        info!(admin = %admin_config.email, "Admin account configured");

        let services = AppServices::new(store, image_host, upload_max_bytes, auth_service);
        let router = create_router(&services, config.cors_origin.as_deref());
        Ok(App { config, router })
    }

    pub async fn start(self) -> Result<(), Box<dyn std::error::Error>> {
        let addr = SocketAddr::new(self.config.host.parse()?, self.config.port);
        info!("Server running at http://{}", addr);
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, self.router).await?;
        Ok(())
    }
}
