//! Prompt composition
//!
//! Instruction prompts are held in an owned [`PromptSet`] passed to the
//! engine at construction, so independent engine instances never share
//! mutable prompt state.

use crate::types::PathSpec;

/// One static, ordered unit of natural-language guidance for the model
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    /// Order in which the prompt is sent to the API
    pub order: i32,
    /// Name identifier; uniqueness is expected but not enforced,
    /// lookups take the first match
    pub name: String,
    /// Content of the prompt
    pub content: String,
}

/// Joins lines into one prompt string, trimming each line first.
fn merge(lines: &[&str]) -> String {
    lines
        .iter()
        .map(|line| line.trim())
        .collect::<Vec<_>>()
        .join("\n")
}

/// An ordered, named collection of instruction prompts.
///
/// The default set instructs the model to behave as a UX tester describing a
/// natural human cursor gesture and to answer with a bare JSON array of
/// `{x, y, deltaTime}` objects.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptSet {
    prompts: Vec<Prompt>,
}

impl Default for PromptSet {
    fn default() -> Self {
        Self {
            prompts: vec![
                Prompt {
                    order: 1,
                    name: "init".to_string(),
                    content: merge(&[
                        "I want you to act as an experienced website user experience tester, \
                         with particular focus on natural human mouse gestures such as cursor \
                         paths, bezier curves, and other pointer behavior.",
                    ]),
                },
                Prompt {
                    order: 2,
                    name: "task".to_string(),
                    content: merge(&[
                        "I will provide a prompt consisting of \"Start Position\", \"End Position\", \
                         \"Initial Timestamp\" and \"Duration\", and your job is to imagine and \
                         describe a natural human mouse cursor path from the start coordinates \
                         to the end coordinates.",
                        "The \"Duration\" is the amount of time the full cursor path should take, \
                         in milliseconds.",
                        "The \"Start Position\" and \"End Position\" are x and y floating point \
                         pixel coordinates on the screen.",
                        "Avoid paths that are straight lines or perfect curves; those are not \
                         natural human gestures.",
                        "Vary the mouse velocity and acceleration along the path and include \
                         minor imperfections.",
                        "Make the path overshoot the \"End Position\" by one or two percent and \
                         then return to it, as a human gesture would.",
                    ]),
                },
                Prompt {
                    order: 3,
                    name: "response".to_string(),
                    content: merge(&[
                        "You will provide your response as a JSON array of mouse coordinate \
                         objects in the following format:",
                        "{\"x\": number, \"y\": number, \"deltaTime\": number}",
                        "The \"x\" and \"y\" values are the floating point coordinates of the \
                         cursor at a given point in time.",
                        "The \"deltaTime\" value is the number of milliseconds elapsed since the \
                         previous point and represents cursor velocity.",
                        "The first point must be the \"Start Position\" with a \"deltaTime\" of 0, \
                         and the last point must be the \"End Position\".",
                        "The sum of all \"deltaTime\" values must not exceed the provided \
                         \"Duration\".",
                        "Do not produce more than 30 points per 1000ms of Duration.",
                    ]),
                },
                Prompt {
                    order: 4,
                    name: "examples".to_string(),
                    content: merge(&[
                        "Assume your role is to generate the output of this function:",
                        "generateMousePath({ start: {x, y}, end: {x, y}, duration, initialTimestamp })",
                        "It returns a realistic-looking mouse path following the guidelines above, \
                         where differences in time between points represent cursor velocity and \
                         the path is never a straight line.",
                    ]),
                },
                Prompt {
                    order: 4,
                    name: "constraints".to_string(),
                    content: merge(&[
                        "Do not include any natural language in your response; return only a JSON \
                         array.",
                        "Make use of any information you have about modelling human mouse \
                         gestures.",
                        "Ensure the content of your response parses as a valid JSON array.",
                        "Imagine the shape of the path and check it meets the requirements before \
                         responding.",
                    ]),
                },
            ],
        }
    }
}

impl PromptSet {
    /// Creates a set from explicit prompts, e.g. for fully custom guidance.
    pub fn new(prompts: Vec<Prompt>) -> Self {
        Self { prompts }
    }

    /// Collects the instruction prompts sorted ascending by order.
    ///
    /// The sort is stable, so prompts sharing an order keep their definition
    /// order. Entries whose content is empty or whitespace-only are dropped.
    pub fn instruction_prompts(&self) -> Vec<String> {
        let mut prompts: Vec<&Prompt> = self.prompts.iter().collect();
        prompts.sort_by_key(|prompt| prompt.order);

        prompts
            .into_iter()
            .filter(|prompt| !prompt.content.trim().is_empty())
            .map(|prompt| prompt.content.clone())
            .collect()
    }

    /// Renders the final execution prompt for one path request,
    /// one fact per line.
    pub fn request_prompt(&self, spec: &PathSpec) -> String {
        let start = format!(
            "Start Position: {{ \"x\": {}, \"y\": {} }}",
            spec.start.x, spec.start.y
        );
        let end = format!(
            "End Position: {{ \"x\": {}, \"y\": {} }}",
            spec.end.x, spec.end.y
        );
        let duration = format!("Duration: {}", spec.duration_ms);

        merge(&[
            "Use the following \"Path Config\" to draw a human-like mouse gesture path from \
             the \"Start Position\" to the \"End Position\" and return it in the array format \
             described above.",
            start.as_str(),
            end.as_str(),
            duration.as_str(),
            "Initial Timestamp: 0",
        ])
    }

    /// Replaces the content of the first prompt with a matching name.
    ///
    /// Returns `false` when no prompt matches; this is a soft, non-failing
    /// operation and never touches the remaining prompts.
    pub fn update_instruction(&mut self, name: &str, content: impl Into<String>) -> bool {
        match self.prompts.iter_mut().find(|prompt| prompt.name == name) {
            Some(prompt) => {
                prompt.content = content.into();
                true
            }
            None => false,
        }
    }
}
