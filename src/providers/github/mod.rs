mod client;
mod provider;

#[cfg(test)]
mod tests;

pub use provider::GitHubProvider;
