//! The built-in haiku set served whenever generation is unavailable.

use folio_core::PoemArtifact;
use rand::seq::{IndexedRandom, SliceRandom};

/// Size of every served batch, and of the built-in set.
pub const BATCH_SIZE: usize = 10;

/// The ten built-in artifacts, in canonical order.
pub fn builtin_poems() -> Vec<PoemArtifact> {
    vec![
        PoemArtifact::new(
            "planes",
            ["Fifteen planes take flight", "Balsa wood, midnight solder", "Belagavi dreams"],
            "Built 15 RC planes + 4 quadcopters from scratch in college",
            "✈️",
        ),
        PoemArtifact::new(
            "parasail",
            ["First paycheck arrives", "Twenty-two engineers soar", "Parasailing joy"],
            "Celebrated first Cognizant paycheck by parasailing with 22 colleagues",
            "🪂",
        ),
        PoemArtifact::new(
            "scuba",
            ["Underwater calm", "Fluid dynamics, felt not", "Dassault taught me this"],
            "First scuba dive was a Dassault team event — experienced aerodynamics viscerally",
            "🤿",
        ),
        PoemArtifact::new(
            "goa",
            ["Goa, four hours south", "Debug code on the beach", "Sunset clears the mind"],
            "Regular Goa trips with the Belagavi crew — best debugging sessions happened on the beach",
            "🏖️",
        ),
        PoemArtifact::new(
            "anime",
            ["Steins;Gate reruns", "Ghost in the Shell at 2 AM", "AI dreams take shape"],
            "Steins;Gate & Ghost in the Shell directly influenced his AI philosophy",
            "📺",
        ),
        PoemArtifact::new(
            "workshop",
            ["Seventy-two hours", "Seventy-two engineers", "Belagavi wakes"],
            "First RC plane workshop: 72 registrations in 72 hours — had to close signups",
            "🛠️",
        ),
        PoemArtifact::new(
            "stirling",
            ["Heat becomes motion", "Stirling engine, half-built, proud", "Theory made real"],
            "Built a Stirling engine in college — theoretically possible, practically challenging",
            "⚙️",
        ),
        PoemArtifact::new(
            "gre",
            ["Pune, 2 AM", "Secret tricks for GRE math", "Students line the hall"],
            "Became so good at GRE math in Pune that students lined up for his tips",
            "📐",
        ),
        PoemArtifact::new(
            "newark",
            ["Two suitcases packed", "Newark fog, September cold", "Dreams weigh nothing here"],
            "Arrived in Newark with two suitcases and a scholarship — September 2022",
            "🌁",
        ),
        PoemArtifact::new(
            "sentinel",
            ["Seven hours, one night", "Search Sentinel wins first place", "Snowstorm, NYC"],
            "Built Search Sentinel in 7 hours during a NYC snowstorm — won 1st place at Pulse NYC",
            "🏆",
        ),
    ]
}

/// The full built-in set in a fresh random order.
pub fn shuffled() -> Vec<PoemArtifact> {
    let mut poems = builtin_poems();
    poems.shuffle(&mut rand::rng());
    poems
}

/// `n` distinct built-in artifacts (at most the whole set), sampled without
/// replacement.
pub fn sample(n: usize) -> Vec<PoemArtifact> {
    builtin_poems()
        .choose_multiple(&mut rand::rng(), n)
        .cloned()
        .collect()
}
