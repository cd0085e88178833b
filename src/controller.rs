//! Controller steering the robot.
//!
//! The robot is controlled from the console. A background thread reads lines from standard input
//! and hands them to the app through a channel; every frame the pending lines are parsed and
//! applied to the session and the program library.

use std::{
    io::{self, BufRead},
    str::FromStr,
    sync::{
        mpsc::{self, Receiver},
        Mutex,
    },
    thread,
};

use bevy::{
    app::AppExit,
    log::{info, warn},
    prelude::*,
};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    domain::{Action, Catalog, Motion, Session},
    programs::{ProgramLibrary, ProgramStore},
    resource::{ProgramsRes, SessionRes},
};

#[derive(Clone, Debug, PartialEq)]
pub enum ConsoleCommand {
    Jog(Action),
    Queue(Vec<Action>),
    Run,
    Clear,
    Reset,
    Environment(Option<String>),
    Environments,
    Status,
    Save(String),
    Programs,
    Load(String),
    Delete(Uuid),
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConsoleError {
    #[error("empty line")]
    Empty,
    #[error("unknown command {0:?}, type `help` for a list")]
    UnknownCommand(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error("invalid program id {0:?}")]
    InvalidId(String),
    #[error(transparent)]
    Action(#[from] crate::domain::CommandError),
}

const HELP: &str = "forward|backward|left|right|stop, queue <action>..., run, clear, reset, \
                    env [name], envs, status, save <name>, programs, load <name>, \
                    delete <id>, quit";

impl FromStr for ConsoleCommand {
    type Err = ConsoleError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (keyword, rest) = match line.split_once(char::is_whitespace) {
            Some((keyword, rest)) => (keyword, rest.trim()),
            None => (line, ""),
        };
        let argument = |name: &'static str| {
            if rest.is_empty() {
                Err(ConsoleError::MissingArgument(name))
            } else {
                Ok(rest.to_string())
            }
        };

        match keyword {
            "" => Err(ConsoleError::Empty),
            "queue" => {
                let actions = rest
                    .split_whitespace()
                    .map(Action::from_str)
                    .collect::<Result<Vec<_>, _>>()?;
                if actions.is_empty() {
                    return Err(ConsoleError::MissingArgument("queue"));
                }
                Ok(ConsoleCommand::Queue(actions))
            }
            "run" => Ok(ConsoleCommand::Run),
            "clear" => Ok(ConsoleCommand::Clear),
            "reset" => Ok(ConsoleCommand::Reset),
            "env" => Ok(ConsoleCommand::Environment(
                (!rest.is_empty()).then(|| rest.to_string()),
            )),
            "envs" => Ok(ConsoleCommand::Environments),
            "status" => Ok(ConsoleCommand::Status),
            "save" => argument("save").map(ConsoleCommand::Save),
            "programs" => Ok(ConsoleCommand::Programs),
            "load" => argument("load").map(ConsoleCommand::Load),
            "delete" => {
                let id = argument("delete")?;
                Uuid::parse_str(&id)
                    .map(ConsoleCommand::Delete)
                    .map_err(|_| ConsoleError::InvalidId(id))
            }
            "help" => Ok(ConsoleCommand::Help),
            "quit" | "exit" => Ok(ConsoleCommand::Quit),
            keyword => keyword
                .parse::<Action>()
                .map(ConsoleCommand::Jog)
                .map_err(|_| ConsoleError::UnknownCommand(keyword.to_string())),
        }
    }
}

/// Whether the app should keep running after a command.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Applies one console command. Failures are logged and leave the session untouched.
pub fn handle<S: ProgramStore>(
    command: ConsoleCommand,
    session: &mut Session,
    programs: &mut ProgramLibrary<S>,
) -> Flow {
    match command {
        ConsoleCommand::Jog(action) => {
            if session.jog(action) == Motion::Blocked {
                warn!("{action} blocked by an obstacle");
            }
        }
        ConsoleCommand::Queue(actions) => {
            for action in actions {
                session.enqueue(action);
            }
            info!("{} command(s) queued", session.queue().len());
        }
        ConsoleCommand::Run => {
            if session.execute() {
                info!("running {} command(s)", session.queue().len());
            } else if session.queue().is_empty() {
                warn!("nothing queued");
            } else {
                warn!("already running");
            }
        }
        ConsoleCommand::Clear => {
            session.clear();
            info!("queue cleared");
        }
        ConsoleCommand::Reset => {
            session.reset();
            info!("robot reset to {}", session.pose());
        }
        ConsoleCommand::Environment(None) => {
            info!("environment {}", session.environment().name());
        }
        ConsoleCommand::Environment(Some(name)) => match session.select_environment(&name) {
            Ok(environment) => info!("switched to {}", environment.name()),
            Err(err) => warn!("{err}, staying in {}", session.environment().name()),
        },
        ConsoleCommand::Environments => {
            for environment in Catalog::global().iter() {
                info!(
                    "{} ({} obstacles)",
                    environment.name(),
                    environment.obstacles().len()
                );
            }
        }
        ConsoleCommand::Status => {
            let readings = session.readings();
            info!(
                "{} in {}, {:?} with {} queued | front {} left {} right {}",
                session.pose(),
                session.environment().name(),
                session.state(),
                session.queue().len(),
                readings.front,
                readings.left,
                readings.right
            );
        }
        ConsoleCommand::Save(name) => {
            match programs.save(
                &name,
                session.queue().commands(),
                session.environment().name(),
            ) {
                Ok(program) => info!("saved {} as {}", program.name(), program.id()),
                Err(err) => warn!("could not save program: {err}"),
            }
        }
        ConsoleCommand::Programs => match programs.programs() {
            Ok(list) if list.is_empty() => info!("no saved programs"),
            Ok(list) => {
                for program in list {
                    info!(
                        "{} [{}] {} command(s) in {}",
                        program.name(),
                        program.id(),
                        program.commands().len(),
                        program.environment()
                    );
                }
            }
            Err(err) => warn!("could not list programs: {err}"),
        },
        ConsoleCommand::Load(name) => match programs.find(&name) {
            Ok(program) => {
                match session.load(program.commands().to_vec(), program.environment()) {
                    Ok(environment) => {
                        info!("loaded {} in {}", program.name(), environment.name())
                    }
                    Err(err) => warn!(
                        "loaded {} but {err}, staying in {}",
                        program.name(),
                        session.environment().name()
                    ),
                }
            }
            Err(err) => warn!("could not load program: {err}"),
        },
        ConsoleCommand::Delete(id) => match programs.delete(id) {
            Ok(()) => info!("deleted program {id}"),
            Err(err) => warn!("could not delete program: {err}"),
        },
        ConsoleCommand::Help => info!("{HELP}"),
        ConsoleCommand::Quit => return Flow::Exit,
    }
    Flow::Continue
}

#[derive(Resource)]
pub struct Console(Mutex<Receiver<String>>);

pub struct Controller;

fn spawn() -> Console {
    let (sender, receiver) = mpsc::channel();
    let _ = thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if sender.send(line).is_err() {
                break;
            }
        }
    });
    Console(Mutex::new(receiver))
}

fn control(
    console: Res<Console>,
    mut session: ResMut<SessionRes>,
    mut programs: ResMut<ProgramsRes>,
    mut exit: EventWriter<AppExit>,
) {
    let Ok(receiver) = console.0.lock() else {
        return;
    };
    while let Ok(line) = receiver.try_recv() {
        let command = match line.parse::<ConsoleCommand>() {
            Ok(command) => command,
            Err(ConsoleError::Empty) => continue,
            Err(err) => {
                warn!("{err}");
                continue;
            }
        };
        if handle(command, &mut session, &mut **programs) == Flow::Exit {
            info!("bye");
            exit.send(AppExit);
            break;
        }
    }
}

impl Plugin for Controller {
    fn build(&self, app: &mut App) {
        app.insert_resource(spawn()).add_systems(Update, control);
    }
}
