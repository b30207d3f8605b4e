use pokemon_legacy_battle::{
    Bag, Battle, BattleConfig, BattleRunner, DataStore, PokemonInst, RandomSource, ReferenceData,
    ScoringPolicy, SeededRng, Team,
};
use std::path::Path;
use std::sync::Arc;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let data_path = Path::new("data");

    let data: Arc<dyn ReferenceData> = match DataStore::load(data_path) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            println!("Error loading reference data: {}", e);
            return;
        }
    };

    let config = match BattleConfig::load(&data_path.join("battle_config.ron")) {
        Ok(config) => config,
        Err(e) => {
            println!("Error loading battle config, using defaults: {}", e);
            BattleConfig::default()
        }
    };

    // An optional first argument seeds the battle for a reproducible run.
    let mut rng = match std::env::args().nth(1).and_then(|arg| arg.parse::<u64>().ok()) {
        Some(seed) => {
            println!("Using seed {}", seed);
            SeededRng::from_seed(seed)
        }
        None => SeededRng::from_os_rng(),
    };

    println!("=== Wild Battle Demo ===");
    if let Err(e) = run_wild_battle_demo(data, config, &mut rng) {
        println!("Battle aborted: {}", e);
    }
}

fn run_wild_battle_demo(
    data: Arc<dyn ReferenceData>,
    config: BattleConfig,
    rng: &mut dyn RandomSource,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut turtwig = PokemonInst::from_species(data.as_ref(), "Turtwig", 12, None)?;
    turtwig.friendly = true;
    let mut starly = PokemonInst::from_species(data.as_ref(), "Starly", 9, None)?;
    starly.friendly = true;
    let friendly = Team::new(vec![turtwig, starly])?;

    let foe = Team::new(vec![
        PokemonInst::from_species(data.as_ref(), "Bidoof", 7, None)?,
        PokemonInst::from_species(data.as_ref(), "Shinx", 6, None)?,
    ])?;
    let bag = Bag::with_items([("Potion", 2), ("Poke Ball", 3)]);

    let battle = Battle::wild(friendly, foe, bag, Arc::clone(&data), config);
    let runner = BattleRunner::new(battle);
    let mut policy = ScoringPolicy::new(data);
    let report = runner.run_to_completion(&mut policy, rng)?;

    for event in &report.events {
        if let Some(text) = event.format(&report.state) {
            println!("{}", text);
        }
    }

    println!();
    println!("Outcome: {:?}", report.outcome);
    for pokemon in report.state.friendly.members() {
        println!(
            "  {} Lv.{} HP {}/{} Exp {}",
            pokemon.name,
            pokemon.level,
            pokemon.current_hp(),
            pokemon.max_hp(),
            pokemon.exp
        );
    }
    Ok(())
}
