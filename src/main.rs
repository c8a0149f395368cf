use marty_admin::api::{AdminApi, HttpAdminApi};
use marty_admin::args;
use marty_admin::controller::http_handlers::{self, DisplaySettings};
use marty_admin::controller::session::ViewSessions;
use marty_admin::logging;

use actix_web::web::Data;
use actix_web::{App, HttpServer};
use std::sync::Arc;

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_tracing();
    let args = args::args_checks()?;

    let api: Arc<dyn AdminApi> = Arc::new(HttpAdminApi::new(&args.api_config())?);
    let sessions = Data::new(ViewSessions::new(api, args.view_idle));
    let settings = Data::new(DisplaySettings {
        offset: args.display_offset,
    });

    tracing::info!(bind = %args.bind, api = %args.api_base_url, "starting admin dashboard");

    let (v, s) = (sessions.clone(), settings.clone());
    HttpServer::new(move || {
        App::new()
            .app_data(v.clone())
            .app_data(s.clone())
            .configure(http_handlers::configure)
    })
    .bind(&args.bind)?
    .run()
    .await?;

    sessions.shutdown();
    Ok(())
}
