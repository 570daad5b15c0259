//! 预导入模块，方便使用

pub use super::assessments::{
    ActiveModel as AssessmentActiveModel, Entity as Assessments, Model as AssessmentModel,
};
pub use super::attempts::{
    ActiveModel as AttemptActiveModel, Entity as Attempts, Model as AttemptModel,
};
pub use super::correct_answers::{
    ActiveModel as CorrectAnswerActiveModel, Entity as CorrectAnswers, Model as CorrectAnswerModel,
};
pub use super::question_options::{
    ActiveModel as QuestionOptionActiveModel, Entity as QuestionOptions,
    Model as QuestionOptionModel,
};
pub use super::questions::{
    ActiveModel as QuestionActiveModel, Entity as Questions, Model as QuestionModel,
};
pub use super::responses::{
    ActiveModel as ResponseActiveModel, Entity as Responses, Model as ResponseModel,
};
