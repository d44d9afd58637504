use crate::{Data, Error};

pub mod fun;
pub mod help;
pub mod logging;
pub mod owner;
pub mod ping;
pub mod tag;
pub mod telephone;
pub mod todo;
pub mod usage;
pub mod util;

pub fn load_all() -> Vec<poise::Command<Data, Error>> {
    vec![
        help::help(),
        ping::ping(),
        usage::usage(),
        fun::eight_ball(),
        fun::choose(),
        fun::slap(),
        fun::truth(),
        fun::dare(),
        fun::encode(),
        fun::decode(),
        fun::http::color(),
        fun::http::fact(),
        fun::http::roast(),
        fun::http::meme(),
        fun::http::fakepeople(),
        fun::http::translate(),
        fun::http::urbandictionary(),
        fun::images::glass(),
        fun::images::jail(),
        fun::images::wasted(),
        fun::images::triggered(),
        fun::images::simpcard(),
        fun::images::pride(),
        fun::images::lolice(),
        fun::images::horny(),
        fun::images::itssostupid(),
        fun::images::ytcomment(),
        telephone::telephone(),
        telephone::dial(),
        tag::tag(),
        todo::todo(),
        logging::logging(),
        owner::leave_guild(),
        owner::makefile(),
        owner::banuser(),
        owner::unbanuser(),
        owner::reportuser(),
    ]
}

#[cfg(test)]
mod tests {
    use super::load_all;
    use std::collections::HashSet;

    #[test]
    fn command_names_and_aliases_are_unique() {
        let mut seen = HashSet::new();
        for command in load_all() {
            assert!(seen.insert(command.name.clone()), "duplicate {}", command.name);
            for alias in &command.aliases {
                assert!(seen.insert(alias.clone()), "duplicate alias {alias}");
            }
        }
    }

    #[test]
    fn every_canvas_filter_has_a_command() {
        let names: HashSet<String> = load_all().into_iter().map(|command| command.name).collect();
        for name in [
            "glass", "jail", "wasted", "triggered", "simpcard", "pride", "lolice", "horny",
        ] {
            assert!(names.contains(name), "missing {name}");
        }
    }
}
