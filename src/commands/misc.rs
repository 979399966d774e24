use clap::CommandFactory;
use clap_complete::{generate, Shell};
use std::io;

pub fn generate_completions(shell: Shell) {
    let mut cmd = crate::Cli::command();
    generate(shell, &mut cmd, "gitscout", &mut io::stdout());

    eprintln!();
    eprintln!("Save the output to the appropriate location for your shell:");
    match shell {
        Shell::Bash => {
            eprintln!("  gitscout completions bash > ~/.local/share/bash-completion/completions/gitscout");
        }
        Shell::Zsh => {
            eprintln!("  gitscout completions zsh > ~/.zsh/completions/_gitscout");
            eprintln!("  # (Add 'fpath=(~/.zsh/completions $fpath)' before 'compinit' in .zshrc)");
        }
        Shell::Fish => {
            eprintln!("  gitscout completions fish > ~/.config/fish/completions/gitscout.fish");
        }
        _ => {}
    }
}
