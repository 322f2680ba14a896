//! Interactive bedtime story generator.
//!
//! A console loop around the story engine: generate a story from a
//! free-text request, then evaluate and revise it, continue it, restart,
//! or exit. All model calls are sequential; a slow call blocks the loop.

use bedtime_core::{
    ClaudeGateway, Evaluation, Gateway, ModelOutcome, StoryReview, StorySession,
};
use std::io::{self, Write};

#[tokio::main]
async fn main() {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Check for API key before entering the loop
    if std::env::var("ANTHROPIC_API_KEY").is_err() {
        eprintln!("Error: ANTHROPIC_API_KEY environment variable not set.");
        eprintln!("Please set it in .env file or with: export ANTHROPIC_API_KEY=your_key_here");
        std::process::exit(1);
    }

    let gateway = match ClaudeGateway::from_env() {
        Ok(gateway) => gateway,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let mut session = StorySession::new(gateway);
    if let Err(e) = run(&mut session).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// The interaction loop: AwaitingPrompt -> StoryDisplayed -> menu choice.
async fn run<G: Gateway>(
    session: &mut StorySession<G>,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("🌙 Welcome to the Bedtime Story Generator!\n");
    println!("I can help you create a magical story for children ages 5-10.");
    println!(
        "You can ask for any type of story - adventure, friendship, learning, fantasy, or mystery!"
    );
    println!("Try a story prompt like: 'A story about a girl named Alice and her best friend Bob, who happens to be a cat.'\n");

    let mut request = read_line("What kind of story do you want to hear? ")?;

    loop {
        println!("\n💭 The storyteller is thinking...");
        let story = session.begin(&request).await?;
        if let Some(cause) = story.analysis.cause() {
            println!("(used fallback analysis: {cause})");
        }
        println!("\n📘 Here's your story:\n");
        println!("{}", story.text.trim());

        // StoryDisplayed: menu until a choice changes state.
        loop {
            println!("\nWhat would you like to do?");
            println!("1. Get feedback and improve the story");
            println!("2. Continue the story");
            println!("3. Start a new story");
            println!("4. Exit");

            let choice = read_line("\nPick a number (1-4): ")?;
            match choice.trim() {
                "1" => {
                    println!("\n🧐 Let's see how we can improve it...");
                    let review = session.review().await?;
                    display_review(&review);

                    let feedback = pick_feedback(&review)?;
                    request = session.revision_request(&feedback)?;
                    println!("\n🔁 Regenerating the story with your feedback...");
                    break;
                }
                "2" => {
                    println!("\n✨ Continuing the story...\n");
                    let continuation = session.continue_story().await?;
                    println!("{}", continuation.trim());
                }
                "3" => {
                    request = read_line("\nWhat kind of story do you want to hear? ")?;
                    break;
                }
                "4" => {
                    println!("\n🌟 Sweet dreams! I'm glad you enjoyed the story!");
                    return Ok(());
                }
                _ => println!("Invalid choice. Please try again."),
            }
        }
    }
}

/// Render the evaluation and suggestions, marking degraded results.
fn display_review(review: &StoryReview) {
    display_evaluation(&review.evaluation);

    println!("\n💡 Here are some ways we can make the story even better:");
    if let Some(cause) = review.suggestions.cause() {
        println!("(used fallback suggestions: {cause})");
    }
    for (i, suggestion) in review.suggestions.value().iter().enumerate() {
        println!("{}. {suggestion}", i + 1);
    }
    println!("4. Add my own idea");
}

fn display_evaluation(evaluation: &ModelOutcome<Evaluation>) {
    println!("\n📊 Story Evaluation:");
    println!("-------------------");
    if let Some(cause) = evaluation.cause() {
        println!("(used fallback evaluation: {cause})");
    }

    let evaluation = evaluation.value();
    for (dimension, score) in evaluation.scores.iter() {
        println!("{}: {score}/10", dimension.label());
    }
    println!("\nOverall Score: {}/10", evaluation.average_score);

    println!("\n✨ Strengths:");
    for strength in &evaluation.strengths {
        println!("• {}", capitalize(strength));
    }

    println!("\n🔧 Areas for Improvement:");
    for area in &evaluation.areas_for_improvement {
        println!("• {}", capitalize(area));
    }
}

/// Ask the user to pick one of the three suggestions or type their own idea.
fn pick_feedback(review: &StoryReview) -> io::Result<String> {
    let suggestions = review.suggestions.value();
    let choice = read_line("\nPick a number (1-4): ")?;

    if choice.trim() == "4" {
        return read_line("Enter your own idea: ");
    }

    let (index, warned) = pick_suggestion(&choice, suggestions.len());
    if warned {
        println!("Invalid choice. Using the first suggestion.");
    }
    Ok(suggestions[index].clone())
}

/// Resolve a 1-based suggestion pick. Anything invalid falls back to the
/// first suggestion.
fn pick_suggestion(input: &str, count: usize) -> (usize, bool) {
    match input.trim().parse::<usize>() {
        Ok(n) if n >= 1 && n <= count => (n - 1, false),
        _ => (0, true),
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Print a prompt and read one trimmed line from stdin.
fn read_line(prompt: &str) -> io::Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_suggestion_valid() {
        assert_eq!(pick_suggestion("1", 3), (0, false));
        assert_eq!(pick_suggestion(" 3 ", 3), (2, false));
    }

    #[test]
    fn test_pick_suggestion_invalid_falls_back_to_first() {
        assert_eq!(pick_suggestion("abc", 3), (0, true));
        assert_eq!(pick_suggestion("9", 3), (0, true));
        assert_eq!(pick_suggestion("0", 3), (0, true));
        assert_eq!(pick_suggestion("", 3), (0, true));
        assert_eq!(pick_suggestion("-1", 3), (0, true));
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("more dialogue"), "More dialogue");
        assert_eq!(capitalize(""), "");
    }
}
