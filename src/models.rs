//! Catalog entities, their request payloads, and the favorite relation kinds.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
}

/// POST /user body. Every field is required; `None` means the key was absent or null.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl CreateUser {
    /// Returns `None` when any required field is missing. New users start active.
    pub fn into_new_user(self) -> Option<NewUser> {
        Some(NewUser {
            email: self.email?,
            password: self.password?,
            first_name: self.first_name?,
            last_name: self.last_name?,
            is_active: true,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow)]
pub struct Character {
    pub id: i64,
    pub name: String,
    pub gender: Option<String>,
    pub height: Option<String>,
}

/// Character payload for create (name required) and update (any subset).
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CharacterFields {
    pub name: Option<String>,
    pub gender: Option<String>,
    pub height: Option<String>,
}

impl Character {
    /// Overwrite the fields present in `changes`, keeping the rest.
    pub fn apply(&mut self, changes: CharacterFields) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if changes.gender.is_some() {
            self.gender = changes.gender;
        }
        if changes.height.is_some() {
            self.height = changes.height;
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow)]
pub struct Planet {
    pub id: i64,
    pub name: String,
    pub weather: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct PlanetFields {
    pub name: Option<String>,
    pub weather: Option<String>,
}

impl Planet {
    pub fn apply(&mut self, changes: PlanetFields) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if changes.weather.is_some() {
            self.weather = changes.weather;
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow)]
pub struct Starship {
    pub id: i64,
    pub name: String,
    pub color: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct StarshipFields {
    pub name: Option<String>,
    pub color: Option<String>,
}

impl Starship {
    pub fn apply(&mut self, changes: StarshipFields) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if changes.color.is_some() {
            self.color = changes.color;
        }
    }
}

/// Which catalog table a favorite points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FavoriteKind {
    Character,
    Planet,
    Starship,
}

impl FavoriteKind {
    /// Capitalized name used in response messages.
    pub fn label(self) -> &'static str {
        match self {
            FavoriteKind::Character => "Character",
            FavoriteKind::Planet => "Planet",
            FavoriteKind::Starship => "Starship",
        }
    }

    pub fn noun(self) -> &'static str {
        match self {
            FavoriteKind::Character => "character",
            FavoriteKind::Planet => "planet",
            FavoriteKind::Starship => "starship",
        }
    }

    /// Join table holding favorites of this kind.
    pub fn table(self) -> &'static str {
        match self {
            FavoriteKind::Character => "favorite_characters",
            FavoriteKind::Planet => "favorite_planets",
            FavoriteKind::Starship => "favorite_starships",
        }
    }

    pub fn target_table(self) -> &'static str {
        match self {
            FavoriteKind::Character => "characters",
            FavoriteKind::Planet => "planets",
            FavoriteKind::Starship => "starships",
        }
    }

    pub fn target_column(self) -> &'static str {
        match self {
            FavoriteKind::Character => "character_id",
            FavoriteKind::Planet => "planet_id",
            FavoriteKind::Starship => "starship_id",
        }
    }

    fn target_key(self) -> &'static str {
        match self {
            FavoriteKind::Character => "characterId",
            FavoriteKind::Planet => "planetId",
            FavoriteKind::Starship => "starshipId",
        }
    }
}

/// One row of a favorite join table.
#[derive(Clone, Debug, PartialEq)]
pub struct Favorite {
    pub kind: FavoriteKind,
    pub id: i64,
    pub user_id: Option<i64>,
    pub target_id: i64,
}

impl Serialize for Favorite {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("id", &self.id)?;
        map.serialize_entry("userId", &self.user_id)?;
        map.serialize_entry(self.kind.target_key(), &self.target_id)?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_user_requires_every_field() {
        let body: CreateUser = serde_json::from_value(json!({
            "email": "leia@alderaan.gov",
            "password": "hope",
            "firstName": "Leia"
        }))
        .unwrap();
        assert!(body.into_new_user().is_none());

        let body: CreateUser = serde_json::from_value(json!({
            "email": "leia@alderaan.gov",
            "password": "hope",
            "firstName": "Leia",
            "lastName": "Organa"
        }))
        .unwrap();
        let user = body.into_new_user().unwrap();
        assert_eq!(user.last_name, "Organa");
        assert!(user.is_active);
    }

    #[test]
    fn user_serialization_hides_password() {
        let user = User {
            id: 1,
            email: "han@falcon.net".into(),
            password: "kessel".into(),
            first_name: "Han".into(),
            last_name: "Solo".into(),
            is_active: true,
        };
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 1,
                "email": "han@falcon.net",
                "firstName": "Han",
                "lastName": "Solo",
                "isActive": true
            })
        );
    }

    #[test]
    fn character_apply_keeps_omitted_fields() {
        let mut character = Character {
            id: 4,
            name: "Luke Skywalker".into(),
            gender: Some("male".into()),
            height: Some("172".into()),
        };
        character.apply(CharacterFields {
            height: Some("175".into()),
            ..Default::default()
        });
        assert_eq!(character.name, "Luke Skywalker");
        assert_eq!(character.gender.as_deref(), Some("male"));
        assert_eq!(character.height.as_deref(), Some("175"));
    }

    #[test]
    fn planet_and_starship_apply() {
        let mut planet = Planet { id: 1, name: "Hoth".into(), weather: Some("frozen".into()) };
        planet.apply(PlanetFields { name: Some("Echo Base".into()), weather: None });
        assert_eq!(planet.name, "Echo Base");
        assert_eq!(planet.weather.as_deref(), Some("frozen"));

        let mut ship = Starship { id: 2, name: "X-wing".into(), color: None };
        ship.apply(StarshipFields { name: None, color: Some("white".into()) });
        assert_eq!(ship.name, "X-wing");
        assert_eq!(ship.color.as_deref(), Some("white"));
    }

    #[test]
    fn favorite_serializes_with_kind_specific_key() {
        let fav = Favorite { kind: FavoriteKind::Planet, id: 9, user_id: None, target_id: 3 };
        assert_eq!(
            serde_json::to_value(&fav).unwrap(),
            json!({"id": 9, "userId": null, "planetId": 3})
        );
    }

    #[test]
    fn favorite_kind_from_path_segment() {
        let kind: FavoriteKind = serde_json::from_value(json!("starship")).unwrap();
        assert_eq!(kind, FavoriteKind::Starship);
        assert!(serde_json::from_value::<FavoriteKind>(json!("droid")).is_err());
    }
}
