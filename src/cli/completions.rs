use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    drvsync completions bash > ~/.bash_completion.d/drvsync\n\n\
                  Generate zsh completions:\n    drvsync completions zsh > ~/.zfunc/_drvsync\n\n\
                  Generate fish completions:\n    drvsync completions fish > ~/.config/fish/completions/drvsync.fish\n\n\
                  Generate PowerShell completions:\n    drvsync completions powershell")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    pub shell: String,
}
