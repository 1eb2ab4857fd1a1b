use std::path::Path;
use async_trait::async_trait;
use log::{error, info};
use notepad::config::app_config::AppConfig;
use notepad::config::figment::FigmentExt;
use notepad::hasher::{ProductionHasher, ProductionHasherConfig};
use notepad::storage::NoteStorage;
use notepad::user_db::{ProductionUserDb, UserDb};
use rocket::data::Limits;
use rocket::fairing::{Fairing, Info};
use rocket::figment::Figment;
use rocket::{Build, Rocket};
use crate::routes::NotepadRocketBuildExt;

pub struct AppSetupFairing {
    app_config: AppConfig,
}

impl AppSetupFairing {
    pub fn new(app_config: AppConfig) -> Self {
        AppSetupFairing {
            app_config,
        }
    }
}

macro_rules! ok_or_bail {
    ($rocket:ident, $expr:expr, |$e:ident| $error_logger:expr) => ({
        match $expr {
            std::result::Result::Ok(ok) => ok,
            std::result::Result::Err(e) => {
                let $e = e;
                $error_logger;
                return std::result::Result::Err($rocket);
            },
        }
    });
}

#[async_trait]
impl Fairing for AppSetupFairing {
    fn info(&self) -> Info {
        use rocket::fairing::Kind;
        Info {
            name: "app setup",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(
        &self,
        rocket: Rocket<Build>,
    ) -> rocket::fairing::Result {
        let form_limit = rocket.config().limits
            .get("form")
            .unwrap_or(Limits::FORM)
            .as_u64();
        ok_or_bail!(
            rocket,
            self.app_config.check_limits(form_limit),
            |e| error!("inconsistent size limits: {e}")
        );

        let hasher_config = ok_or_bail!(
            rocket,
            ProductionHasherConfig::try_from(&self.app_config.hasher_config),
            |e| error!("invalid hasher configuration: {e}")
        );

        let storage: NoteStorage = ok_or_bail!(
            rocket,
            NoteStorage::new(&self.app_config).await,
            |e| error!("note storage initialization failed: {e}")
        );

        let user_db: Box<dyn UserDb> = Box::new(
            ok_or_bail!(
                rocket,
                ProductionUserDb::new(
                    &self.app_config,
                    ProductionHasher::new(hasher_config),
                ).await,
                |e| error!("user db initialization failed: {e}")
            )
        );

        info!(
            "serving notes from \"{}\"",
            NoteStorage::get_notes_dir(&self.app_config).display(),
        );
        Ok(
            rocket
                .manage(storage)
                .manage(user_db)
                .manage(self.app_config.clone())
                .install_notepad_routes()
        )
    }
}

pub fn make_figment(config_file: &Path) -> Figment {
    rocket::Config::figment()
        .setup_app_config(config_file)
}

pub fn build_rocket(
    figment: Figment,
) -> Result<Rocket<Build>, rocket::figment::Error> {
    let app_config: AppConfig = figment.extract()?;
    Ok(
        rocket
            ::custom(figment)
            .attach(AppSetupFairing::new(app_config))
    )
}
