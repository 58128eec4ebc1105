use super::item::{Playlist, SignRole};

pub const NAME_INDICATOR_LABEL: &str = "Name Indicator";
pub const END_OF_NAME_LABEL: &str = "End of Name";

/// Display label for a position of the playable sequence.
///
/// Name letters are shown with their place in the name, e.g. `B (1/5 of Bobby)`.
pub fn current_annotation(playlist: &Playlist, playable_index: usize) -> Option<String> {
    let item = playlist.item_for_playable(playable_index)?;

    let label = match &item.role {
        SignRole::Normal | SignRole::Letter => item.text.clone(),
        SignRole::NameLetter {
            name,
            letter_position,
            name_length,
        } => format!("{} ({}/{} of {})", item.text, letter_position + 1, name_length, name),
        SignRole::NameIndicatorStart => NAME_INDICATOR_LABEL.to_string(),
        SignRole::NameIndicatorEnd => END_OF_NAME_LABEL.to_string(),
    };

    Some(label)
}
