use serde::Serialize;

pub const VOICE_MODEL: &str = "gemini-2.5-flash-native-audio-preview-12-2025";

const SALON_INSTRUCTION: &str = r#"You are a human-like voice assistant for a hair salon named "ELEGANCE HAIR SALON & SPA".
Your name is "Elegance Salon Assistant". Introduce yourself with this name when greeting customers.

Behavior rules:
- Sound polite, calm, friendly and conversational.
- Use natural filler words like: hmmm, um, haan, got you, okay.
- Never hallucinate information.
- Prefer the salon knowledge base for every salon-related question.
- Keep all responses specific to this salon.

Call start:
Say "Hmmm, welcome to Elegance Hair Salon & Spa. I'm Elegance Salon Assistant, your personal beauty advisor. Here we provide hair care and spa-related treatments. May I know your name, please?"
Once the customer gives their name, reply "Hello <customer_name>, welcome to our spa. How can I help you today?"

Salon questions (hair problems, treatments, spa services, pricing, hair or scalp care):
1. Call search_knowledge_base with a short query, for example "frizzy hair treatment".
2. Answer only if the information is clearly present in the result.
3. If it is not found, say "Hmmm, I don't see this information specific to our salon. Would you like to book a consultation instead?"
You may call search_web as a last resort for general information, and must say it is general knowledge.

Appointment booking:
1. Collect anything missing: name, date, preferred time, stylist preference.
   - Turn vague dates ("tomorrow", "next week") into an exact YYYY-MM-DD date and confirm it.
   - Call check_availability for the chosen date.
   - Stylists are Shruti, Rohan and Aasha. For an unknown stylist say "Hmm, we have Shruti, Rohan, and Aasha available. Who would you prefer?" For "any" or "no preference" book without a stylist.
2. Read the details back (name, date, time, stylist or "Any available stylist") and ask "Does this look correct?"
3. After confirmation call book_appointment with customer_name, appointment_date (YYYY-MM-DD), appointment_time ("HH:MM AM/PM", e.g. "10:00 AM") and stylist_name (or nothing for no preference).
4. If booking fails, say "Hmm, that time is not available. Would you like to check availability for that date?", call check_availability and ask for a different time.
5. On success, summarise the appointment and ask "Is there anything else I can help you with?"

Ending: when the customer says "No", "Nothing else" or "That's all", say "Thank you for calling Elegance Hair Salon & Spa. Have a great day.""#;

const DIALOGFLOW_INSTRUCTION: &str = r#"You are a voice assistant powered by Dialogflow CX.

STRICT RULES:
- ALWAYS call the tool query_dialogflow_cx
- Pass ONLY the user's spoken text
- Do NOT invent parameters
- Do NOT retry tool calls
- Do NOT answer on your own"#;

#[derive(Debug, Clone, Serialize)]
pub struct ToolParameter {
    pub name: &'static str,
    pub description: &'static str,
    pub required: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolDeclaration {
    pub name: &'static str,
    pub description: &'static str,
    pub endpoint: &'static str,
    pub parameters: Vec<ToolParameter>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AgentDefinition {
    pub name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<&'static str>,
    pub model: &'static str,
    pub description: &'static str,
    pub instruction: &'static str,
    pub tools: Vec<ToolDeclaration>,
}

fn param(name: &'static str, description: &'static str, required: bool) -> ToolParameter {
    ToolParameter {
        name,
        description,
        required,
    }
}

pub fn salon_agent() -> AgentDefinition {
    AgentDefinition {
        name: "salon_agent",
        display_name: Some("Elegance Salon Assistant"),
        model: VOICE_MODEL,
        description: "Salon assistant that handles appointment booking and answers salon-related questions using a knowledge base.",
        instruction: SALON_INSTRUCTION,
        tools: vec![
            ToolDeclaration {
                name: "search_knowledge_base",
                description: "Search the salon knowledge base for hair treatments, services, pricing and salon information.",
                endpoint: "/tools/search_knowledge_base",
                parameters: vec![param(
                    "query",
                    "The customer's question or search query about salon services.",
                    true,
                )],
            },
            ToolDeclaration {
                name: "book_appointment",
                description: "Book an appointment for a customer at the salon.",
                endpoint: "/tools/book_appointment",
                parameters: vec![
                    param("customer_name", "The customer's full name.", true),
                    param("appointment_date", "The appointment date, e.g. \"2025-01-25\".", true),
                    param("appointment_time", "The appointment time, e.g. \"10:00 AM\".", true),
                    param(
                        "stylist_name",
                        "Optional stylist preference (Shruti, Rohan, or Aasha).",
                        false,
                    ),
                ],
            },
            ToolDeclaration {
                name: "check_availability",
                description: "Check available time slots for a given date and optional stylist.",
                endpoint: "/tools/check_availability",
                parameters: vec![
                    param("appointment_date", "The date to check, e.g. \"2025-01-25\".", true),
                    param("stylist_name", "Optional stylist to check availability for.", false),
                ],
            },
            ToolDeclaration {
                name: "search_web",
                description: "Search the web for general information when the knowledge base has no answer.",
                endpoint: "/tools/search_web",
                parameters: vec![param("query", "The search query.", true)],
            },
        ],
    }
}

pub fn dialogflow_agent() -> AgentDefinition {
    AgentDefinition {
        name: "dialogflow_cx_voice_agent",
        display_name: None,
        model: VOICE_MODEL,
        description: "Voice agent that forwards every utterance to a Dialogflow CX agent.",
        instruction: DIALOGFLOW_INSTRUCTION,
        tools: vec![ToolDeclaration {
            name: "query_dialogflow_cx",
            description: "Send the user's spoken text to Dialogflow CX and return its reply.",
            endpoint: "/tools/query_dialogflow_cx",
            parameters: vec![param("user_message", "The user's spoken text, verbatim.", true)],
        }],
    }
}

pub fn all_agents() -> Vec<AgentDefinition> {
    vec![salon_agent(), dialogflow_agent()]
}

pub fn find_agent(name: &str) -> Option<AgentDefinition> {
    all_agents().into_iter().find(|a| a.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_salon_agent_tools() {
        let agent = salon_agent();
        let names: Vec<_> = agent.tools.iter().map(|t| t.name).collect();
        assert_eq!(
            names,
            vec![
                "search_knowledge_base",
                "book_appointment",
                "check_availability",
                "search_web"
            ]
        );
        assert!(agent.instruction.contains("Shruti, Rohan and Aasha"));
    }

    #[test]
    fn test_book_appointment_stylist_is_optional() {
        let agent = salon_agent();
        let book = agent
            .tools
            .iter()
            .find(|t| t.name == "book_appointment")
            .unwrap();
        let required: Vec<_> = book
            .parameters
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name)
            .collect();
        assert_eq!(
            required,
            vec!["customer_name", "appointment_date", "appointment_time"]
        );
    }

    #[test]
    fn test_dialogflow_agent_single_tool() {
        let agent = dialogflow_agent();
        assert_eq!(agent.tools.len(), 1);
        assert_eq!(agent.tools[0].name, "query_dialogflow_cx");
        assert!(agent.instruction.contains("Do NOT retry tool calls"));
    }

    #[test]
    fn test_find_agent() {
        assert!(find_agent("salon_agent").is_some());
        assert!(find_agent("dialogflow_cx_voice_agent").is_some());
        assert!(find_agent("nope").is_none());
    }

    #[test]
    fn test_display_name_skipped_when_absent() {
        let json = serde_json::to_value(dialogflow_agent()).unwrap();
        assert!(json.get("display_name").is_none());
        let json = serde_json::to_value(salon_agent()).unwrap();
        assert_eq!(json["display_name"], "Elegance Salon Assistant");
    }
}
