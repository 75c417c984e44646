//! GraphQL documents issued by the client and the shapes of their `data`.

use super::resource::{CharacterDetail, CharacterSummary};
use serde::Deserialize;

/// A named GraphQL operation.
///
#[derive(Debug, Clone, Copy)]
pub struct Operation {
    pub name: &'static str,
    pub document: &'static str,
}

pub const CHARACTERS_LIST: Operation = Operation {
    name: "CharactersList",
    document: "query CharactersList { characters { results { id name species image } } }",
};

pub const CHARACTER: Operation = Operation {
    name: "Character",
    document: "query Character($id: ID!) { character(id: $id) { \
               id name status species type gender image created \
               origin { name } location { name } \
               episode { id name episode air_date } } }",
};

#[derive(Debug, Deserialize)]
pub struct CharactersListData {
    pub characters: Option<CharacterPage>,
}

#[derive(Debug, Deserialize)]
pub struct CharacterPage {
    pub results: Option<Vec<Option<CharacterSummary>>>,
}

#[derive(Debug, Deserialize)]
pub struct CharacterData {
    pub character: Option<CharacterDetail>,
}
