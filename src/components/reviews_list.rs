use leptos::*;
use crate::media::star_array;
use crate::models::review::Review;

#[component]
pub fn ReviewsList(reviews: Vec<Review>) -> impl IntoView {
    if reviews.is_empty() {
        return view! { <p class="no-reviews">{ "No reviews yet." }</p> }.into_view();
    }

    view! {
        <div class="reviews">
            <h3>{ format!("Reviews ({})", reviews.len()) }</h3>
            <ul>
                {
                    reviews.into_iter().map(|review| {
                        view! {
                            <li>
                                <span class="stars">
                                    {star_array(review.rating).into_iter().map(|filled| {
                                        if filled { "★" } else { "☆" }
                                    }).collect::<String>()}
                                </span>
                                <strong>{ review.author }</strong>
                                <p>{ review.description }</p>
                            </li>
                        }
                    }).collect::<Vec<_>>()
                }
            </ul>
        </div>
    }
    .into_view()
}
