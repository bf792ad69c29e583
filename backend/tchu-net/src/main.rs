// Hosts a game of tCHu: waits for two players to connect, then runs the game between them.

use log::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::error::Error;
use std::fs::File;
use std::net::TcpListener;
use std::path::PathBuf;
use structopt::StructOpt;
use tchu::game::Game;
use tchu::map;
use tchu_net::remote_player_proxy::RemotePlayerProxy;

#[derive(Debug, StructOpt)]
#[structopt(name = "tchu-server", about = "Hosts a game of tCHu between two remote players.")]
struct Opt {
    /// Address to listen on
    #[structopt(short, long, default_value = "0.0.0.0")]
    address: String,

    /// Port to listen on
    #[structopt(short, long, default_value = "5108")]
    port: u16,

    /// Name of the first player to connect
    #[structopt(long, default_value = "Ada")]
    player1: String,

    /// Name of the second player to connect
    #[structopt(long, default_value = "Charles")]
    player2: String,

    /// Seed of the shuffles, for a reproducible game.
    #[structopt(long)]
    seed: Option<u64>,

    /// Write the outcome of the game as JSON.
    #[structopt(long)]
    #[structopt(parse(from_os_str))]
    summary: Option<PathBuf>,

    /// Activate debug mode
    #[structopt(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let opt = Opt::from_args();
    let level = if opt.verbose {
        if cfg!(debug_assertions) {
            LevelFilter::Trace
        } else {
            LevelFilter::Debug
        }
    } else {
        LevelFilter::Info
    };
    simple_logger::SimpleLogger::new().with_level(level).init()?;
    debug!("{:#?}", opt);

    let listener = TcpListener::bind((opt.address.as_str(), opt.port))?;
    info!("Waiting for players on {}.", listener.local_addr()?);

    let mut proxies = Vec::with_capacity(2);
    for name in [&opt.player1, &opt.player2] {
        let (stream, peer) = listener.accept()?;
        info!("{} connected from {}.", name, peer);
        proxies.push(RemotePlayerProxy::from_stream(stream)?);
    }
    let (proxy1, proxy2) = proxies.split_at_mut(1);

    let mut rng = match opt.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let outcome = Game::play(
        [&mut proxy1[0], &mut proxy2[0]],
        [opt.player1.clone(), opt.player2.clone()],
        &map::all_tickets(),
        &mut rng,
    )?;

    match outcome.winner {
        Some(winner) => info!(
            "{} wins, {} points to {}.",
            outcome.player_names[winner.index()],
            outcome.points[winner.index()],
            outcome.points[winner.next().index()]
        ),
        None => info!("Draw, {} points each.", outcome.points[0]),
    }

    if let Some(path) = &opt.summary {
        serde_json::to_writer_pretty(File::create(path)?, &outcome)?;
        info!("Wrote the outcome to {}.", path.display());
    }

    Ok(())
}
