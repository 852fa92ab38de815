use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use skillbridge_core::AppError;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::courses::curriculum::{CurriculumService, TextItemKind};
use crate::modules::courses::model::{
    ComprehensiveCourseDto, Course, CourseDetails, CourseLesson, CourseModule, CourseTextItem,
    CreateCourseDto, CreateLessonDto, CreateModuleDto, CreateTextItemDto, LandingCourse,
    LandingQuery, MessageResponse, UpdateCourseDto, UpdateLessonDto, UpdateModuleDto,
    UpdateTextItemDto,
};
use crate::modules::courses::service::CourseService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/courses/landing",
    params(LandingQuery),
    responses((status = 200, description = "Published courses", body = Vec<LandingCourse>)),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn get_landing_courses(
    State(state): State<AppState>,
    Query(query): Query<LandingQuery>,
) -> Result<Json<Vec<LandingCourse>>, AppError> {
    Ok(Json(CourseService::landing(&state.db, query).await?))
}

#[utoipa::path(
    get,
    path = "/api/courses",
    responses(
        (status = 200, description = "All courses with curriculum, newest first", body = Vec<CourseDetails>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_courses(State(state): State<AppState>) -> Result<Json<Vec<CourseDetails>>, AppError> {
    Ok(Json(CourseService::list(&state.db).await?))
}

#[utoipa::path(
    get,
    path = "/api/courses/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course with curriculum", body = CourseDetails),
        (status = 404, description = "Course not found")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CourseDetails>, AppError> {
    Ok(Json(CourseService::get(&state.db, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/courses",
    request_body = CreateCourseDto,
    responses(
        (status = 201, description = "Course created", body = Course),
        (status = 400, description = "Invalid input or unknown category/instructor"),
        (status = 403, description = "Forbidden - staff only")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_course(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateCourseDto>,
) -> Result<(StatusCode, Json<Course>), AppError> {
    let course = CourseService::create(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

#[utoipa::path(
    put,
    path = "/api/courses/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    request_body = UpdateCourseDto,
    responses(
        (status = 200, description = "Course updated", body = Course),
        (status = 404, description = "Course not found")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateCourseDto>,
) -> Result<Json<Course>, AppError> {
    Ok(Json(CourseService::update(&state.db, id, dto).await?))
}

#[utoipa::path(
    post,
    path = "/api/courses/comprehensive",
    request_body = ComprehensiveCourseDto,
    responses(
        (status = 201, description = "Course and curriculum created", body = CourseDetails),
        (status = 400, description = "Invalid input or unknown category/instructor"),
        (status = 403, description = "Forbidden - staff only")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_comprehensive_course(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<ComprehensiveCourseDto>,
) -> Result<(StatusCode, Json<CourseDetails>), AppError> {
    let course = CourseService::create_comprehensive(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

#[utoipa::path(
    put,
    path = "/api/courses/{id}/comprehensive",
    params(("id" = Uuid, Path, description = "Course ID")),
    request_body = ComprehensiveCourseDto,
    responses(
        (status = 200, description = "Course and curriculum replaced", body = CourseDetails),
        (status = 400, description = "Invalid input or unknown category/instructor"),
        (status = 404, description = "Course not found")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_comprehensive_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<ComprehensiveCourseDto>,
) -> Result<Json<CourseDetails>, AppError> {
    Ok(Json(CourseService::update_comprehensive(&state.db, id, dto).await?))
}

#[utoipa::path(
    delete,
    path = "/api/courses/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course deleted", body = MessageResponse),
        (status = 404, description = "Course not found"),
        (status = 409, description = "Course has applications")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    CourseService::delete(&state.db, id).await?;
    Ok(Json(MessageResponse::new("Course deleted")))
}

// Modules

#[utoipa::path(
    get,
    path = "/api/courses/{id}/modules",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Modules in order", body = Vec<CourseModule>),
        (status = 404, description = "Course not found")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_course_modules(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<CourseModule>>, AppError> {
    Ok(Json(CurriculumService::list_modules(&state.db, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/courses/modules",
    request_body = CreateModuleDto,
    responses(
        (status = 201, description = "Module created", body = CourseModule),
        (status = 404, description = "Course not found")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_module(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateModuleDto>,
) -> Result<(StatusCode, Json<CourseModule>), AppError> {
    let module = CurriculumService::create_module(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(module)))
}

#[utoipa::path(
    put,
    path = "/api/courses/modules/{id}",
    params(("id" = Uuid, Path, description = "Module ID")),
    request_body = UpdateModuleDto,
    responses(
        (status = 200, description = "Module updated", body = CourseModule),
        (status = 404, description = "Module not found")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_module(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateModuleDto>,
) -> Result<Json<CourseModule>, AppError> {
    Ok(Json(CurriculumService::update_module(&state.db, id, dto).await?))
}

#[utoipa::path(
    delete,
    path = "/api/courses/modules/{id}",
    params(("id" = Uuid, Path, description = "Module ID")),
    responses(
        (status = 200, description = "Module and its lessons deleted", body = MessageResponse),
        (status = 404, description = "Module not found")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_module(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    CurriculumService::delete_module(&state.db, id).await?;
    Ok(Json(MessageResponse::new("Module deleted")))
}

// Lessons

#[utoipa::path(
    get,
    path = "/api/courses/modules/{id}/lessons",
    params(("id" = Uuid, Path, description = "Module ID")),
    responses(
        (status = 200, description = "Lessons in order", body = Vec<CourseLesson>),
        (status = 404, description = "Module not found")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_module_lessons(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<CourseLesson>>, AppError> {
    Ok(Json(CurriculumService::list_lessons(&state.db, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/courses/lessons",
    request_body = CreateLessonDto,
    responses(
        (status = 201, description = "Lesson created", body = CourseLesson),
        (status = 404, description = "Module not found")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_lesson(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateLessonDto>,
) -> Result<(StatusCode, Json<CourseLesson>), AppError> {
    let lesson = CurriculumService::create_lesson(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(lesson)))
}

#[utoipa::path(
    put,
    path = "/api/courses/lessons/{id}",
    params(("id" = Uuid, Path, description = "Lesson ID")),
    request_body = UpdateLessonDto,
    responses(
        (status = 200, description = "Lesson updated", body = CourseLesson),
        (status = 404, description = "Lesson not found")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_lesson(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateLessonDto>,
) -> Result<Json<CourseLesson>, AppError> {
    Ok(Json(CurriculumService::update_lesson(&state.db, id, dto).await?))
}

#[utoipa::path(
    delete,
    path = "/api/courses/lessons/{id}",
    params(("id" = Uuid, Path, description = "Lesson ID")),
    responses(
        (status = 200, description = "Lesson deleted", body = MessageResponse),
        (status = 404, description = "Lesson not found")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_lesson(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    CurriculumService::delete_lesson(&state.db, id).await?;
    Ok(Json(MessageResponse::new("Lesson deleted")))
}

// Learning outcomes

#[utoipa::path(
    get,
    path = "/api/courses/{id}/learning-outcomes",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Learning outcomes", body = Vec<CourseTextItem>),
        (status = 404, description = "Course not found")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_learning_outcomes(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<CourseTextItem>>, AppError> {
    let items = CurriculumService::list_texts(&state.db, TextItemKind::LearningOutcome, id).await?;
    Ok(Json(items))
}

#[utoipa::path(
    post,
    path = "/api/courses/learning-outcomes",
    request_body = CreateTextItemDto,
    responses(
        (status = 201, description = "Learning outcome created", body = CourseTextItem),
        (status = 404, description = "Course not found")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_learning_outcome(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateTextItemDto>,
) -> Result<(StatusCode, Json<CourseTextItem>), AppError> {
    let item = CurriculumService::create_text(&state.db, TextItemKind::LearningOutcome, dto).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

#[utoipa::path(
    put,
    path = "/api/courses/learning-outcomes/{id}",
    params(("id" = Uuid, Path, description = "Learning outcome ID")),
    request_body = UpdateTextItemDto,
    responses(
        (status = 200, description = "Learning outcome updated", body = CourseTextItem),
        (status = 404, description = "Learning outcome not found")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_learning_outcome(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateTextItemDto>,
) -> Result<Json<CourseTextItem>, AppError> {
    let item =
        CurriculumService::update_text(&state.db, TextItemKind::LearningOutcome, id, dto).await?;
    Ok(Json(item))
}

#[utoipa::path(
    delete,
    path = "/api/courses/learning-outcomes/{id}",
    params(("id" = Uuid, Path, description = "Learning outcome ID")),
    responses(
        (status = 200, description = "Learning outcome deleted", body = MessageResponse),
        (status = 404, description = "Learning outcome not found")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_learning_outcome(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    CurriculumService::delete_text(&state.db, TextItemKind::LearningOutcome, id).await?;
    Ok(Json(MessageResponse::new("Learning outcome deleted")))
}

// Prerequisites

#[utoipa::path(
    get,
    path = "/api/courses/{id}/prerequisites",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Prerequisites", body = Vec<CourseTextItem>),
        (status = 404, description = "Course not found")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_prerequisites(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<CourseTextItem>>, AppError> {
    let items = CurriculumService::list_texts(&state.db, TextItemKind::Prerequisite, id).await?;
    Ok(Json(items))
}

#[utoipa::path(
    post,
    path = "/api/courses/prerequisites",
    request_body = CreateTextItemDto,
    responses(
        (status = 201, description = "Prerequisite created", body = CourseTextItem),
        (status = 404, description = "Course not found")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_prerequisite(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateTextItemDto>,
) -> Result<(StatusCode, Json<CourseTextItem>), AppError> {
    let item = CurriculumService::create_text(&state.db, TextItemKind::Prerequisite, dto).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

#[utoipa::path(
    put,
    path = "/api/courses/prerequisites/{id}",
    params(("id" = Uuid, Path, description = "Prerequisite ID")),
    request_body = UpdateTextItemDto,
    responses(
        (status = 200, description = "Prerequisite updated", body = CourseTextItem),
        (status = 404, description = "Prerequisite not found")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_prerequisite(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateTextItemDto>,
) -> Result<Json<CourseTextItem>, AppError> {
    let item = CurriculumService::update_text(&state.db, TextItemKind::Prerequisite, id, dto).await?;
    Ok(Json(item))
}

#[utoipa::path(
    delete,
    path = "/api/courses/prerequisites/{id}",
    params(("id" = Uuid, Path, description = "Prerequisite ID")),
    responses(
        (status = 200, description = "Prerequisite deleted", body = MessageResponse),
        (status = 404, description = "Prerequisite not found")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_prerequisite(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    CurriculumService::delete_text(&state.db, TextItemKind::Prerequisite, id).await?;
    Ok(Json(MessageResponse::new("Prerequisite deleted")))
}
