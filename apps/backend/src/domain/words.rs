//! Static catalog of candidate secret words.

use crate::infra::rng::GameRng;

/// Candidate secret words. Everyday nouns work best: concrete enough to ask
/// yes/no questions about, common enough that the insider blends in.
pub const WORDS: &[&str] = &[
    "APPLE", "ANCHOR", "BALLOON", "BANANA", "BICYCLE", "BLANKET", "BRIDGE", "BUTTON", "CACTUS",
    "CAMERA", "CANDLE", "CASTLE", "CIRCUS", "COMPASS", "CURTAIN", "DIAMOND", "DOLPHIN", "DRAGON",
    "ELEPHANT", "ENVELOPE", "FEATHER", "FIREWORK", "FOREST", "FOUNTAIN", "GARDEN", "GLACIER",
    "GUITAR", "HAMMER", "HARBOR", "HELMET", "ISLAND", "JACKET", "JIGSAW", "KETTLE", "LADDER",
    "LANTERN", "LIBRARY", "LIGHTHOUSE", "MAGNET", "MIRROR", "MOUNTAIN", "MUSHROOM", "NEEDLE",
    "OCTOPUS", "ORCHESTRA", "PENGUIN", "PILLOW", "PIRATE", "PLANET", "POCKET", "PUZZLE",
    "RAINBOW", "ROBOT", "ROCKET", "SANDWICH", "SCISSORS", "SHADOW", "SNOWMAN", "SPIDER",
    "STADIUM", "STATUE", "SUITCASE", "SUNFLOWER", "TELESCOPE", "THEATER", "THUNDER", "TICKET",
    "TOWER", "TRACTOR", "TREASURE", "TRUMPET", "TUNNEL", "UMBRELLA", "VIOLIN", "VOLCANO",
    "WAFFLE", "WHISTLE", "WINDMILL", "WIZARD", "ZEBRA",
];

/// Draw a fresh secret word.
pub fn pick_secret_word(rng: &GameRng) -> String {
    WORDS[rng.index(WORDS.len())].to_string()
}
