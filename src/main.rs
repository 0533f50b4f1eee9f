// vim: set ai et ts=4 sts=4 sw=4:
use std::fs;
use std::io::{self, Read};
use std::process;
use std::time::Instant;
use clap::{App, Arg, ArgMatches};
use log::{error, info, LevelFilter};

use nonogram_solver::{Puzzle, Dispatcher, Response, PuzzleError};
use nonogram_solver::util::is_a_tty;

pub struct Args {
    pub puzzle_path:   String,
    pub delay:         Option<u64>,
    pub json:          bool,
    pub visual_groups: Option<usize>, // visual subdivision size
    pub emit_color:    bool,
    pub verbosity:     u64,
}

impl Args {
    fn from_matches(matches: &ArgMatches) -> Result<Self, String> {
        let delay = matches.value_of("delay")
                           .map(|ms| ms.parse::<u64>().map_err(|e| format!("invalid delay {:?}: {}", ms, e)))
                           .transpose()?;
        let visual_groups = match matches.value_of("groups") {
            Some(n) => n.parse::<usize>().map_err(|e| format!("invalid group size {:?}: {}", n, e))?,
            None    => 5,
        };
        Ok(Args {
            puzzle_path:   matches.value_of("PUZZLE").unwrap_or("-").to_string(),
            delay,
            json:          matches.is_present("json"),
            visual_groups: Some(visual_groups).filter(|&n| n > 0),
            emit_color:    !matches.is_present("no-color") && is_a_tty(io::stdout()),
            verbosity:     matches.occurrences_of("verbose"),
        })
    }
}

fn parse_args() -> Result<Args, String> {
    let matches = App::new("nonogram-solver")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Solves nonogram puzzles by single-line deduction")
        .arg(Arg::with_name("PUZZLE")
             .help("YAML puzzle file with 'rows' and 'cols' lists, or - for stdin")
             .required(true)
             .index(1))
        .arg(Arg::with_name("delay")
             .short("d")
             .long("delay")
             .value_name("MS")
             .takes_value(true)
             .help("Report progress after every line, pausing MS milliseconds in between"))
        .arg(Arg::with_name("json")
             .short("j")
             .long("json")
             .help("Print every solver message as a line of JSON"))
        .arg(Arg::with_name("groups")
             .short("g")
             .long("groups")
             .value_name("N")
             .takes_value(true)
             .help("Draw a subdivision line every N squares (0 for none)"))
        .arg(Arg::with_name("no-color")
             .long("no-color")
             .help("Never emit ANSI colors"))
        .arg(Arg::with_name("verbose")
             .short("v")
             .multiple(true)
             .help("Increase log verbosity"))
        .get_matches();
    Args::from_matches(&matches)
}

fn setup_logging(verbosity: u64) -> Result<(), log::SetLoggerError> {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{}][{}] {}", record.level(), record.target(), message))
        })
        .level(level)
        .chain(io::stderr())
        .apply()
}

fn load_puzzle(path: &str) -> Result<Puzzle, PuzzleError> {
    let mut s = String::new();
    if path == "-" {
        io::stdin().read_to_string(&mut s)?;
    } else {
        s = fs::read_to_string(path)?;
    }
    Puzzle::from_yaml_str(&s)
}

fn solve(puzzle: Puzzle, args: &Args) -> i32 {
    let started = Instant::now();
    let mut dispatcher = Dispatcher::new();
    if let Err(e) = dispatcher.submit(puzzle.into_request(args.delay)) {
        error!("{}", e);
        return 2;
    }

    loop {
        let response = match dispatcher.recv() {
            Ok(response) => response,
            Err(e)       => { error!("{}", e); return 2; }
        };
        if args.json {
            match serde_json::to_string(&response) {
                Ok(line) => println!("{}", line),
                Err(e)   => error!("could not serialize response: {}", e),
            }
        }

        match response {
            Response::Update { grid, scanner, hints, .. } => {
                if !args.json {
                    println!("scanned {}", scanner);
                    println!("{}", Puzzle { grid, hints }.render(args.visual_groups, args.emit_color));
                }
            }
            Response::Error { grid, scanner, hints, .. } => {
                if !args.json {
                    println!("{}", Puzzle { grid, hints }.render(args.visual_groups, args.emit_color));
                }
                error!("bad hints at {}", scanner);
                return 1;
            }
            Response::Finish { grid, hints, iterations, .. } => {
                let puzzle = Puzzle { grid, hints };
                let elapsed = started.elapsed().as_millis();
                if !args.json {
                    println!("{}", puzzle.render(args.visual_groups, args.emit_color));
                    match puzzle.is_solved() {
                        true  => println!("solved after {} iterations ({} ms)", iterations, elapsed),
                        false => println!("stuck after {} iterations ({} ms): {} squares undetermined",
                                          iterations, elapsed, puzzle.grid.count(nonogram_solver::CellState::Unset)),
                    }
                }
                info!("done in {} ms", elapsed);
                return 0;
            }
        }
    }
}

fn main() {
    let args = match parse_args() {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("error: {}", msg);
            process::exit(2);
        }
    };
    if let Err(e) = setup_logging(args.verbosity) {
        eprintln!("could not set up logging: {}", e);
    }

    let puzzle = match load_puzzle(&args.puzzle_path) {
        Ok(puzzle) => puzzle,
        Err(e) => {
            error!("{}: {}", args.puzzle_path, e);
            process::exit(2);
        }
    };
    info!("loaded {}x{} puzzle from {}", puzzle.width(), puzzle.height(), args.puzzle_path);

    process::exit(solve(puzzle, &args));
}
