/// Fixed instruction sent with every image.
///
/// The labelled block at the end is the contract with the reply parser.
pub const PROMPT_TEMPLATE: &str = "Analyze this image of produce (fruits/vegetables) and provide:

1. Produce Identification:
   Identify the specific fruit or vegetable shown.

2. Freshness Assessment (1-10 scale):
   Evaluate visual indicators including color, texture, blemishes. Vegetables tend to stay fresh for longer periods of time, so a higher score is expected.

3. Expected Shelf Life:
   Predict remaining days of freshness.
   
4. Confidence Score:
   Provide reliability percentage of assessment.

5. Visual Indicators Observed:
   List key visual cues used in assessment.

Present results in this format:
Produce: [name]
Freshness Score: [1-10]
Expected Lifespan (Days): [number]
Confidence Score: [percentage]
Key Indicators: [bullet points]";

pub fn create_prompt() -> String {
    PROMPT_TEMPLATE.to_string()
}
