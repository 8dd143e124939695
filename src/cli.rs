use clap::Parser;

/// Command-line chat client for the GitHub Models API.
#[derive(Parser, Debug)]
#[command(name = "ghchat")]
#[command(about = "Send a prompt to the GitHub Models API or list available models")]
pub struct Cli {
    /// Print the models available to this token and exit
    #[arg(long)]
    pub models: bool,

    /// User message for a single-turn chat completion
    #[arg(long, default_value = "What is the capital of France?")]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::Cli;

    #[test]
    fn defaults_to_a_chat_completion() {
        let cli = Cli::parse_from(["ghchat"]);
        assert!(!cli.models);
        assert_eq!(cli.message, "What is the capital of France?");
    }

    #[test]
    fn accepts_models_flag_and_custom_message() {
        let cli = Cli::parse_from(["ghchat", "--models"]);
        assert!(cli.models);

        let cli = Cli::parse_from(["ghchat", "--message", "hello there"]);
        assert_eq!(cli.message, "hello there");
    }
}
