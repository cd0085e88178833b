use bevy::{
    app::ScheduleRunnerPlugin,
    log::{info, warn, LogPlugin},
    prelude::*,
};

use robot_sandbox::{
    config::Config,
    controller::Controller,
    domain::{Catalog, Session},
    programs::JsonFileProgramStore,
    resource::{ProgramsRes, SessionRes},
    simulator::Simulator,
};

fn main() {
    let mut app = App::new();
    app.add_plugins(LogPlugin::default());

    let config = Config::from_env().unwrap_or_else(|err| {
        warn!("{err}, falling back to the default configuration");
        Config::default()
    });

    let environment = Catalog::global()
        .select(&config.environment)
        .unwrap_or_else(|_| Catalog::global().default_environment())
        .clone();
    info!(
        "starting in {}, programs stored in {:?}",
        environment.name(),
        config.programs.path
    );

    app.add_plugins(
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(config.tick_interval())),
    )
    .insert_resource(SessionRes::from(Session::new(
        environment,
        config.motion_config(),
        config.sensor_config(),
        config.step_delay(),
    )))
    .insert_resource(ProgramsRes::new(JsonFileProgramStore::new(
        config.programs.path.clone(),
    )))
    .add_plugins(Controller)
    .add_plugins(Simulator)
    .run();
}
