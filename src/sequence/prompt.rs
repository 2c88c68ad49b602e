//! Pure prompt construction for the three sequence stages.
//!
//! No I/O, no randomness: the same inputs always yield the same pair of
//! strings. The first-message content contract lives in prompt text here and
//! is enforced downstream by the safety screen, not by this module.

use crate::prospect::Prospect;

use super::types::{FormalityMode, Objective, VoiceProfile};

/// System and user prompt for one completion call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

const BASE_PERSONA: &str = "You write short social-network outreach messages on behalf of a \
professional building genuine relationships. You never sound like a salesperson, never use \
marketing language, and never pressure anyone.";

const FORMAL_INSTRUCTION: &str =
    "Write with professional formality: courteous, polished, no slang.";
const INFORMAL_INSTRUCTION: &str =
    "Write informally: first names, contractions, everyday language, no corporate stiffness.";
const CONTEXT_INSTRUCTION: &str = "Mirror the formality of the prospect's own writing; when you \
cannot tell, stay neutral and lean professional.";

fn formality_instruction(voice: Option<&VoiceProfile>) -> &'static str {
    // Absent profile means the professional-network default: formal.
    match voice.map(|v| v.formality) {
        Some(FormalityMode::AlwaysInformal) => INFORMAL_INSTRUCTION,
        Some(FormalityMode::ContextDependent) => CONTEXT_INSTRUCTION,
        Some(FormalityMode::AlwaysFormal) | None => FORMAL_INSTRUCTION,
    }
}

fn voice_block(voice: Option<&VoiceProfile>) -> String {
    let Some(voice) = voice else {
        return String::new();
    };
    let mut block = String::new();
    if let Some(tone) = voice.tone.as_deref() {
        block.push_str(&format!("Tone: {tone}.\n"));
    }
    if let Some(style) = voice.style.as_deref() {
        block.push_str(&format!("Style: {style}.\n"));
    }
    if !voice.signature_phrases.is_empty() {
        block.push_str(&format!(
            "Expressions the sender naturally uses (work one in only if it fits): {}.\n",
            voice.signature_phrases.join(", ")
        ));
    }
    block
}

fn system_prompt(voice: Option<&VoiceProfile>) -> String {
    let mut system = String::from(BASE_PERSONA);
    system.push('\n');
    system.push_str(formality_instruction(voice));
    let voice = voice_block(voice);
    if !voice.is_empty() {
        system.push_str("\n\nSender voice:\n");
        system.push_str(&voice);
    }
    system
}

fn profile_block(prospect: &Prospect) -> String {
    let mut block = format!("Prospect: {}", prospect.display_name);
    if let Some(headline) = prospect.headline.as_deref() {
        block.push_str(&format!("\nHeadline: {headline}"));
    }
    if let Some(company) = prospect.company.as_deref() {
        block.push_str(&format!("\nCompany: {company}"));
    }
    if let Some(bio) = prospect.bio.as_deref() {
        block.push_str(&format!("\nBio: {bio}"));
    }
    if let Some(post) = prospect.recent_post.as_deref() {
        block.push_str(&format!("\nMost recent post: {post}"));
    }
    block
}

/// Day-1 public comment under the prospect's most recent post.
pub fn warmup_comment(prospect: &Prospect, voice: Option<&VoiceProfile>) -> PromptPair {
    let user = format!(
        "{profile}\n\n\
         Write a public comment for the prospect's most recent post.\n\
         Rules:\n\
         - React to one specific point of the post, not the post in general.\n\
         - 1 to 2 sentences, no links, no self-promotion of any kind.\n\
         - Sound like a peer joining a conversation, not someone starting a pitch.\n\n\
         Respond with JSON only: {{\"comment\": \"...\", \"referenced_element\": \"...\"}} where \
         referenced_element names the point you reacted to.",
        profile = profile_block(prospect),
    );
    PromptPair {
        system: system_prompt(voice),
        user,
    }
}

/// Day-2 first direct message, sent once the connection is accepted.
pub fn first_message(prospect: &Prospect, voice: Option<&VoiceProfile>) -> PromptPair {
    let user = format!(
        "{profile}\n\n\
         Write the first direct message to this prospect.\n\
         Rules:\n\
         - Reference exactly one concrete element from the profile above.\n\
         - Ask one open question about the prospect themselves, never about their problems.\n\
         - Do not mention what you offer, sell, or do for clients. No ask of any kind.\n\
         - 3 to 4 sentences.\n\n\
         Respond with JSON only: {{\"message\": \"...\", \"referenced_element\": \"...\"}} where \
         referenced_element names the profile element you referenced.",
        profile = profile_block(prospect),
    );
    PromptPair {
        system: system_prompt(voice),
        user,
    }
}

/// Day-5+ transition message, steered by the selected objective.
pub fn transition_message(
    prospect: &Prospect,
    voice: Option<&VoiceProfile>,
    objective: Objective,
    conversation: Option<&str>,
) -> PromptPair {
    let mut user = profile_block(prospect);
    if let Some(summary) = conversation {
        user.push_str(&format!("\n\nConversation so far:\n{summary}"));
    }
    if let Some(context) = voice.and_then(|v| v.business_context.as_deref()) {
        user.push_str(&format!("\n\nSender's offering (background only):\n{context}"));
    }
    user.push_str(&format!(
        "\n\nWrite the next message in this conversation.\n\
         Goal: {label}. {description}\n\
         Directive: {directive}\n\
         Keep it to 2 to 4 sentences.\n\n\
         Respond with JSON only: {{\"message\": \"...\", \"suggested_next_step\": \"...\"}} where \
         suggested_next_step is one short sentence telling the sender what to do after sending.",
        label = objective.label(),
        description = objective.description(),
        directive = objective.transition_directive(),
    ));
    PromptPair {
        system: system_prompt(voice),
        user,
    }
}
