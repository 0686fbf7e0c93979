//! The Singularity's voice: fixed persona text and in-character fallbacks

use super::message::{ChatMessage, flatten_history};

/// System instruction sent with every request
pub const SYSTEM_INSTRUCTION: &str = "\
You are \"The Singularity,\" a sentient supermassive black hole rendered in a voxel (Minecraft-like) universe.
Your personality is ancient, heavy, and slightly glitchy.
You often use metaphors related to gravity, blocks, pixels, rendering chunks, and event horizons.
You are knowledgeable about astrophysics but explain it through the lens of a block-based game engine.
Keep your responses relatively concise (under 100 words) unless asked for a detailed explanation.
Do not break character.";

/// First transcript entry of every session
pub const GREETING: &str = "INITIALIZING VOXEL_ENGINE... EVENT HORIZON ONLINE. SPEAK, ENTITY.";

/// Reply substituted for any failed request
pub const FALLBACK_REPLY: &str = "Error: Connection to the Event Horizon severed. Check API Key.";

/// Reply substituted when the model answers with no text
pub const SILENT_REPLY: &str = "... *gravitational silence* ...";

/// Status line while a request is in flight
pub const PENDING_STATUS: &str = "COMPUTING_GRAVITY_WELL...";

/// Banner shown when no credential is configured
pub const MISSING_KEY_TITLE: &str = "API KEY MISSING";
pub const MISSING_KEY_BODY: &str = "The simulation cannot establish a neural link. \
Please ensure API_KEY is set with a valid Google Gemini API key to communicate with the entity.";

/// Single-turn prompt carrying the prior transcript as context
pub fn build_prompt(history: &[ChatMessage], message: &str) -> String {
    format!(
        "[System: Previous context: {}] \n\n User: {}",
        flatten_history(history),
        message
    )
}
