use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Style {
    Mockup,
    #[default]
    FemaleModel,
    MaleModel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ModelEthnicity {
    #[default]
    Local,
    Foreign,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Pose {
    #[default]
    StandingPose,
    SittingPose,
    WalkingPose,
    LeaningPose,
    CloseUpPose,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PhotoAspect {
    #[default]
    Square,
    Portrait,
}

macro_rules! enum_variants {
    ($name:ident { $($variant:ident),+ $(,)? }) => {
        impl $name {
            pub const VARIANTS: &'static [&'static str] = &[$(stringify!($variant)),+];
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $(stringify!($variant) => Ok($name::$variant),)+
                    other => Err(format!(
                        "'{}' is not one of: {}",
                        other,
                        $name::VARIANTS.join(", ")
                    )),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let name = match self {
                    $($name::$variant => stringify!($variant),)+
                };
                f.write_str(name)
            }
        }
    };
}

enum_variants!(Style {
    Mockup,
    FemaleModel,
    MaleModel
});
enum_variants!(ModelEthnicity { Local, Foreign });
enum_variants!(Pose {
    StandingPose,
    SittingPose,
    WalkingPose,
    LeaningPose,
    CloseUpPose
});
enum_variants!(PhotoAspect { Square, Portrait });

/// A single failed form field, suitable for inline display next to the field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Raw form input as it comes off the UI, before schema validation. All
/// fields are plain strings; `validate` turns them into a typed
/// `PromptRequest` or a list of field-level errors.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PromptForm {
    pub product_description: String,
    pub style: String,
    pub model_ethnicity: String,
    pub pose: String,
    pub photo_aspect: String,
    #[serde(default)]
    pub additional_details: String,
}

impl PromptForm {
    pub fn validate(&self) -> Result<PromptRequest, Vec<FieldError>> {
        let mut errors = Vec::new();

        let description = self.product_description.trim();
        if description.chars().count() < 2 {
            errors.push(FieldError {
                field: "product_description",
                message: "Product description must be at least 2 characters.".to_string(),
            });
        }

        let style = parse_field::<Style>("style", &self.style, &mut errors);
        let model_ethnicity =
            parse_field::<ModelEthnicity>("model_ethnicity", &self.model_ethnicity, &mut errors);
        let pose = parse_field::<Pose>("pose", &self.pose, &mut errors);
        let photo_aspect =
            parse_field::<PhotoAspect>("photo_aspect", &self.photo_aspect, &mut errors);

        if !errors.is_empty() {
            return Err(errors);
        }

        let details = self.additional_details.trim();
        Ok(PromptRequest {
            product_description: description.to_string(),
            style: style.unwrap(),
            model_ethnicity: model_ethnicity.unwrap(),
            pose: pose.unwrap(),
            photo_aspect: photo_aspect.unwrap(),
            additional_details: if details.is_empty() {
                None
            } else {
                Some(details.to_string())
            },
        })
    }
}

fn parse_field<T: FromStr<Err = String>>(
    field: &'static str,
    value: &str,
    errors: &mut Vec<FieldError>,
) -> Option<T> {
    match value.parse() {
        Ok(parsed) => Some(parsed),
        Err(message) => {
            errors.push(FieldError { field, message });
            None
        }
    }
}

/// A validated generation request. Immutable once built.
#[derive(Debug, Clone, Serialize)]
pub struct PromptRequest {
    pub product_description: String,
    pub style: Style,
    pub model_ethnicity: ModelEthnicity,
    pub pose: Pose,
    pub photo_aspect: PhotoAspect,
    pub additional_details: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptResult {
    pub prompt: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> PromptForm {
        PromptForm {
            product_description: "White t-shirt".to_string(),
            style: "FemaleModel".to_string(),
            model_ethnicity: "Local".to_string(),
            pose: "StandingPose".to_string(),
            photo_aspect: "Square".to_string(),
            additional_details: String::new(),
        }
    }

    #[test]
    fn valid_form_produces_typed_request() {
        let request = valid_form().validate().unwrap();
        assert_eq!(request.product_description, "White t-shirt");
        assert_eq!(request.style, Style::FemaleModel);
        assert_eq!(request.model_ethnicity, ModelEthnicity::Local);
        assert_eq!(request.pose, Pose::StandingPose);
        assert_eq!(request.photo_aspect, PhotoAspect::Square);
        assert!(request.additional_details.is_none());
    }

    #[test]
    fn short_description_is_rejected_with_field_message() {
        let mut form = valid_form();
        form.product_description = " x ".to_string();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "product_description");
        assert!(errors[0].message.contains("at least 2 characters"));
    }

    #[test]
    fn unknown_enum_values_are_rejected_per_field() {
        let mut form = valid_form();
        form.style = "GhostMannequin".to_string();
        form.pose = "Jumping".to_string();
        let errors = form.validate().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["style", "pose"]);
        assert!(errors[0].message.contains("Mockup"));
    }

    #[test]
    fn whitespace_details_become_none() {
        let mut form = valid_form();
        form.additional_details = "   ".to_string();
        let request = form.validate().unwrap();
        assert!(request.additional_details.is_none());
    }

    #[test]
    fn enum_round_trips_through_display_and_from_str() {
        for name in Pose::VARIANTS {
            let pose: Pose = name.parse().unwrap();
            assert_eq!(pose.to_string(), *name);
        }
        assert!("".parse::<Style>().is_err());
    }
}
