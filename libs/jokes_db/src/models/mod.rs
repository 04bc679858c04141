pub mod joke;

pub use joke::{Joke, JokeListItem, NewJoke};
