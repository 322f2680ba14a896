//! Five-beat narrative arc templates, one per story type.

use super::analysis::StoryType;

const ADVENTURE_ARC: &str = "\
Story Arc:
1. Introduction: Introduce the main character and their normal world
2. Call to Adventure: Something changes or a problem arises
3. Journey: The character faces challenges and meets helpers
4. Climax: The biggest challenge or most exciting moment
5. Resolution: How the character solves the problem and what they learn";

const FRIENDSHIP_ARC: &str = "\
Story Arc:
1. Introduction: Show the character's life before meeting their friend
2. Meeting: How the characters meet and become friends
3. Challenge: A problem that tests their friendship
4. Solution: How they work together to solve it
5. Lesson: What they learn about friendship";

const LEARNING_ARC: &str = "\
Story Arc:
1. Introduction: The character's initial understanding
2. Discovery: What they learn or discover
3. Challenge: How they apply their new knowledge
4. Success: How they succeed using what they learned
5. Reflection: What they learned and how it helps them";

const FANTASY_ARC: &str = "\
Story Arc:
1. Introduction: The magical world and its rules
2. Discovery: The character finds something magical
3. Adventure: How they use or explore the magic
4. Challenge: A magical problem they must solve
5. Resolution: How they use magic to help others";

const MYSTERY_ARC: &str = "\
Story Arc:
1. Introduction: The mysterious situation
2. Investigation: Clues the character finds
3. Discovery: What they learn about the mystery
4. Solution: How they solve the mystery
5. Revelation: The truth and what they learned";

/// The narrative arc for a story type. Pure lookup, no failure mode.
pub fn story_arc(story_type: StoryType) -> &'static str {
    match story_type {
        StoryType::Adventure => ADVENTURE_ARC,
        StoryType::Friendship => FRIENDSHIP_ARC,
        StoryType::Learning => LEARNING_ARC,
        StoryType::Fantasy => FANTASY_ARC,
        StoryType::Mystery => MYSTERY_ARC,
    }
}

/// Arc lookup from a raw label. Unrecognized labels, including the empty
/// string, get the adventure arc.
pub fn story_arc_for_label(label: &str) -> &'static str {
    story_arc(StoryType::from_label(label))
}
